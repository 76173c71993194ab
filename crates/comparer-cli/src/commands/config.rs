use super::prompts;
use crate::output::{Output, OutputFormat};
use crate::ConfigCommands;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Table};
use media_catalog_config::{default_config, Config, CredentialStore, PathManager, SortSetting, MAX_PAGE_SIZE};
use media_catalog_models::MediaType;
use owo_colors::OwoColorize;
use serde_json::json;

const SORT_CHOICES: [(&str, SortSetting); 4] = [
    ("popularity", SortSetting::Popularity),
    ("rating", SortSetting::Rating),
    ("title", SortSetting::Title),
    ("year", SortSetting::Year),
];

pub async fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(full, output),
        ConfigCommands::Init => init_config(output),
        ConfigCommands::SetKey { service, key } => set_key(service, key, output),
    }
}

fn load_credentials(path_manager: &PathManager) -> Result<CredentialStore> {
    let credentials_file = path_manager.credentials_file();
    let mut store = CredentialStore::new(credentials_file.clone());
    store
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;
    Ok(store)
}

fn show_config(full: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();

    if !config_file.exists() {
        output.warn(format!("Configuration file not found at: {}", config_file.display()));
        output.info("Run 'media-comparer config init' to create it, or set MOVIE_API_URL and TV_API_URL.");
    }

    let config = Config::load_with_env(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    let credentials = load_credentials(&path_manager)?;

    let movie_key = credentials.resolve_movie_api_key(&config.movies).unwrap_or_default();
    let tv_key = credentials.resolve_tv_api_key(&config.tv).unwrap_or_default();
    let display_key = |key: &str| if full { key.to_string() } else { mask_string(key) };

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            println!("\n{}", "Configuration".bright_cyan().bold());
            println!("{}\n", config_file.display().to_string().dimmed());

            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            table.set_header(vec![
                Cell::new("Setting").add_attribute(Attribute::Bold),
                Cell::new("Value").add_attribute(Attribute::Bold),
            ]);
            let rows = [
                ("movies.base_url", or_not_set(&config.movies.base_url)),
                ("movies api key", display_key(&movie_key)),
                ("tv.base_url", or_not_set(&config.tv.base_url)),
                ("tv api key", display_key(&tv_key)),
                ("catalog.page_size", config.catalog.page_size.to_string()),
                ("catalog.default_sort", sort_name(config.catalog.default_sort).to_string()),
                ("http.timeout_secs", config.http.timeout_secs.to_string()),
                ("http.user_agent", config.http.user_agent.clone()),
            ];
            for (setting, value) in rows {
                table.add_row(vec![Cell::new(setting), Cell::new(value)]);
            }
            println!("{}", table);

            if let Err(e) = config.validate() {
                println!();
                output.warn(e.to_string());
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "config_file": config_file.display().to_string(),
                "movies": {
                    "base_url": config.movies.base_url,
                    "api_key": display_key(&movie_key),
                },
                "tv": {
                    "base_url": config.tv.base_url,
                    "api_key": display_key(&tv_key),
                },
                "catalog": {
                    "page_size": config.catalog.page_size,
                    "default_sort": config.catalog.default_sort,
                },
                "http": {
                    "timeout_secs": config.http.timeout_secs,
                    "user_agent": config.http.user_agent,
                },
                "valid": config.validate().is_ok(),
            }));
        }
    }

    Ok(())
}

fn init_config(output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create configuration directories: {}", e))?;

    let config_file = path_manager.config_file();
    let mut config = if config_file.exists() {
        Config::load_from_file(&config_file)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?
    } else {
        default_config()
    };

    print_section_header("Service URLs", output);
    config.movies.base_url = prompt_base_url("Movie API base URL", &config.movies.base_url, output)?;
    config.tv.base_url = prompt_base_url("TV API base URL", &config.tv.base_url, output)?;

    print_section_header("Catalog", output);
    config.catalog.page_size = prompts::prompt_number_in_range(
        "Titles per source per page",
        config.catalog.page_size,
        1,
        MAX_PAGE_SIZE,
        output,
    )?;
    let names: Vec<&str> = SORT_CHOICES.iter().map(|(name, _)| *name).collect();
    let current = SORT_CHOICES
        .iter()
        .position(|(_, sort)| *sort == config.catalog.default_sort)
        .unwrap_or(0);
    let choice = prompts::prompt_select("Default sort", &names, current)?;
    config.catalog.default_sort = SORT_CHOICES[choice].1;

    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("Invalid configuration: {}", e))?;
    config
        .save_to_file(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save config to {}: {}", config_file.display(), e))?;
    output.success(format!("Configuration saved to {}", config_file.display()));

    print_section_header("API keys", output);
    let mut credentials = load_credentials(&path_manager)?;
    let movie_key = prompts::prompt_secret("Movie API key (leave empty to keep current)")?;
    if !movie_key.trim().is_empty() {
        credentials.set_movie_api_key(movie_key.trim().to_string());
    }
    let tv_key = prompts::prompt_secret("TV API key (leave empty to keep current)")?;
    if !tv_key.trim().is_empty() {
        credentials.set_tv_api_key(tv_key.trim().to_string());
    }
    credentials
        .save()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save credentials: {}", e))?;
    output.success("API keys saved");

    Ok(())
}

fn set_key(service: MediaType, key: Option<String>, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let key = match key {
        Some(key) => key,
        None => prompts::prompt_secret(&format!("{} API key", service.label()))?,
    };
    let key = key.trim().to_string();
    if key.is_empty() {
        return Err(color_eyre::eyre::eyre!("API key is required"));
    }

    let mut credentials = load_credentials(&path_manager)?;
    match service {
        MediaType::Movie => credentials.set_movie_api_key(key.clone()),
        MediaType::Tv => credentials.set_tv_api_key(key.clone()),
    }
    credentials
        .save()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save credentials: {}", e))?;

    output.success(format!("{} API key saved ({})", service.label(), mask_string(&key)));
    Ok(())
}

fn prompt_base_url(prompt: &str, current: &str, output: &Output) -> Result<String> {
    loop {
        let input = prompts::prompt_string(prompt, Some(current))?;
        match validate_base_url(&input) {
            Ok(()) => return Ok(input.trim().trim_end_matches('/').to_string()),
            Err(e) => output.error(format!("Validation error: {}", e)),
        }
    }
}

fn validate_base_url(input: &str) -> Result<(), &'static str> {
    let input = input.trim();
    if input.is_empty() {
        return Err("URL cannot be empty");
    }
    if !input.starts_with("http://") && !input.starts_with("https://") {
        return Err("URL must start with http:// or https://");
    }
    Ok(())
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    if s.len() <= 4 {
        return "*".repeat(s.len());
    }
    match (s.get(..2), s.get(s.len() - 2..)) {
        (Some(head), Some(tail)) => format!("{}***{}", head, tail),
        _ => "*".repeat(s.chars().count()),
    }
}

fn or_not_set(value: &str) -> String {
    if value.trim().is_empty() {
        "<not set>".to_string()
    } else {
        value.to_string()
    }
}

fn sort_name(sort: SortSetting) -> &'static str {
    SORT_CHOICES
        .iter()
        .find(|(_, s)| *s == sort)
        .map_or("popularity", |(name, _)| *name)
}

fn print_section_header(title: &str, output: &Output) {
    output.println("");
    output.println(format!("{}", title.bold().bright_cyan()));
    output.println(format!("{}", "─".repeat(title.len()).bright_cyan()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string(""), "<not set>");
        assert_eq!(mask_string("abc"), "***");
        assert_eq!(mask_string("sk-1234567890"), "sk***90");
    }

    #[test]
    fn test_validate_base_url() {
        assert!(validate_base_url("https://movies.example.com").is_ok());
        assert!(validate_base_url("  ").is_err());
        assert!(validate_base_url("ftp://movies.example.com").is_err());
    }

    #[test]
    fn test_sort_name() {
        assert_eq!(sort_name(SortSetting::Year), "year");
        assert_eq!(sort_name(SortSetting::default()), "popularity");
    }
}
