use clap::Parser;
use tech_signup::utils::logger;
use tech_signup::{CliConfig, FormController, FormError, RawSubmission, SchemaConfig};

/// Fills the form from the draft the way a user would: scalar fields first,
/// then one appended row per technology.
fn fill_form(form: &mut FormController, draft: &RawSubmission) -> Result<(), FormError> {
    form.set_name(draft.name.as_str());
    form.set_email(draft.email.as_str());
    form.set_password(draft.password.as_str());

    for tech in &draft.techs {
        let key = form.append_tech();
        form.set_tech_title(key, tech.title.as_str())?;
        form.set_tech_knowledge(key, tech.knowledge.as_str())?;
    }
    Ok(())
}

fn load_draft(config: &CliConfig) -> Result<RawSubmission, FormError> {
    let content = std::fs::read_to_string(&config.draft)?;
    Ok(serde_json::from_str(&content)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    let schema_config = match &config.config {
        Some(path) => {
            tracing::info!("Loading schema configuration from {}", path.display());
            match SchemaConfig::from_file(path) {
                Ok(schema_config) => schema_config,
                Err(e) => {
                    tracing::error!("Configuration rejected: {}", e);
                    eprintln!("Failed to load config file '{}': {}", path.display(), e);
                    std::process::exit(2);
                }
            }
        }
        None => SchemaConfig::default(),
    };

    let draft = match load_draft(&config) {
        Ok(draft) => draft,
        Err(e) => {
            tracing::error!("Draft could not be read: {}", e);
            eprintln!("Failed to read draft '{}': {}", config.draft.display(), e);
            std::process::exit(2);
        }
    };

    let mut form = FormController::with_config(schema_config)?;
    fill_form(&mut form, &draft)?;

    if let Err(errors) = form.submit() {
        for error in errors {
            eprintln!("{}: {}", error.path, error.message);
        }
        std::process::exit(1);
    }

    if let Some(output) = form.rendered_output()? {
        println!("{}", output);
    }

    Ok(())
}
