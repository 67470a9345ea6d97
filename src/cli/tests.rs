#[cfg(test)]
mod tests {
    use crate::cli::Args;
    use crate::config::LLMProvider;
    use clap::Parser;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_args_default_values() {
        let args = Args::try_parse_from(["maitre-rs"]).unwrap();

        assert!(args.query.is_none());
        assert!(args.config.is_none());
        assert!(!args.trace);
        assert!(!args.no_narration);
        assert!(!args.no_food_data);
        assert!(!args.verbose);
    }

    #[test]
    fn test_args_positional_query() {
        let args =
            Args::try_parse_from(["maitre-rs", "¿Qué vino recomiendan para el salmón?", "-v"])
                .unwrap();

        assert_eq!(
            args.query.as_deref(),
            Some("¿Qué vino recomiendan para el salmón?")
        );
        assert!(args.verbose);
    }

    #[test]
    fn test_args_override_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("maitre.toml");
        fs::write(
            &config_path,
            r#"
history_window = 5

[llm]
provider = "openai"
model_specialist = "gpt-4o-mini"

[knowledge]
wine_k = 4
"#,
        )
        .unwrap();

        let args = Args::try_parse_from([
            "maitre-rs",
            "--config",
            config_path.to_str().unwrap(),
            "--wine-index",
            "/datos/vinos",
            "--llm-provider",
            "deepseek",
            "--model-coordinator",
            "deepseek-chat",
            "--usda-api-key",
            "clave",
            "--trace",
            "--no-narration",
            "--no-food-data",
        ])
        .unwrap();

        let config = args.into_config().unwrap();
        assert_eq!(config.history_window, 5);
        assert_eq!(config.knowledge.wine_k, 4);
        assert_eq!(config.knowledge.wine_index_path, PathBuf::from("/datos/vinos"));
        assert_eq!(config.llm.provider, LLMProvider::DeepSeek);
        assert_eq!(config.llm.model_coordinator, "deepseek-chat");
        assert_eq!(config.llm.model_specialist, "gpt-4o-mini");
        assert_eq!(config.food_data.api_key, "clave");
        assert!(config.trace.enabled);
        assert!(!config.llm.narration);
        assert!(!config.food_data.enabled);
    }

    #[test]
    fn test_unknown_provider_keeps_configured_one() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("maitre.toml");
        fs::write(&config_path, "[llm]\nprovider = \"anthropic\"\n").unwrap();

        let args = Args::try_parse_from([
            "maitre-rs",
            "-c",
            config_path.to_str().unwrap(),
            "--llm-provider",
            "desconocido",
        ])
        .unwrap();

        let config = args.into_config().unwrap();
        assert_eq!(config.llm.provider, LLMProvider::Anthropic);
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("no_existe.toml");

        let args =
            Args::try_parse_from(["maitre-rs", "--config", missing.to_str().unwrap()]).unwrap();
        let err = args.into_config().unwrap_err();
        assert!(
            err.to_string()
                .starts_with("No se pudo leer el archivo de configuración")
        );
    }
}
