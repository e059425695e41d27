use anyhow::{Context, Result, anyhow};
use products_hr::PaginationSettings;

#[derive(Clone, Debug, Default)]
pub struct AppConfig {
    pub cors_allowed_origins: Vec<String>,
    pub pagination: PaginationSettings,
    pub auto_migrate: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let auto_migrate = env_bool(lookup("AUTO_MIGRATE"), false);

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .filter_map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect::<Vec<_>>();

        let defaults = PaginationSettings::default();
        let page_size = |var: &str| env_u64(var, lookup(var));
        let default_size = page_size("PAGE_SIZE_DEFAULT")?.unwrap_or(defaults.default_size);
        let max_size = page_size("PAGE_SIZE_MAX")?.unwrap_or(defaults.max_size);
        if default_size == 0 {
            return Err(anyhow!("PAGE_SIZE_DEFAULT must be at least 1"));
        }
        if max_size < default_size {
            return Err(anyhow!(
                "PAGE_SIZE_MAX ({max_size}) must not be below PAGE_SIZE_DEFAULT ({default_size})"
            ));
        }

        Ok(Self {
            cors_allowed_origins,
            pagination: PaginationSettings {
                default_size,
                max_size,
            },
            auto_migrate,
        })
    }
}

fn env_bool(value: Option<String>, default: bool) -> bool {
    value
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(default)
}

fn env_u64(var: &str, value: Option<String>) -> Result<Option<u64>> {
    match value {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .with_context(|| format!("invalid {var}: {raw}")),
        _ => Ok(None),
    }
}
