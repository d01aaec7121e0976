use std::{env, error::Error, fs::File, io::BufReader};

use bmi_client::Config;
use bmi_form::{FormError, StandaloneForm};
use bmi_model::{field::RawFormInput, record::Record};
use log::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    log4rs::init_file("log4rs.yml", Default::default())?;

    let path = env::args().nth(1).unwrap_or_else(|| "data.json".to_owned());
    let file = File::open(&path)?;
    let entries: Vec<RawFormInput> = serde_json::from_reader(BufReader::new(file))?;
    info!("Loaded {} entries from {}", entries.len(), path);

    let client = bmi_client::create(Config::from_env()?);
    let mut form = StandaloneForm::new(
        Box::new(client),
        Box::new(|record: &Record| {
            info!(
                "Registered {}: BMI {:.2} ({})",
                record.name, record.bmi, record.category
            )
        }),
    );

    for (i, entry) in entries.iter().enumerate() {
        form.fill(entry);
        match form.submit().await {
            Ok(_) => {}
            Err(FormError::Validation(errors)) => {
                for (field, _) in errors.iter() {
                    warn!(
                        "Entry #{}: {}",
                        i,
                        errors.message(field).unwrap_or_default()
                    );
                }
                form.reset();
            }
            Err(e) => {
                error!("Entry #{}: {}", i, e);
                form.reset();
            }
        }
    }

    Ok(())
}
