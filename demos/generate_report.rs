use chrono::Local;
use dotenv::dotenv;
use property_appraisal::*;
use std::error::Error;
use std::path::Path;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn Error>> {
    dotenv().ok();
    println!("🏠 Starting Property Appraisal Example...");

    // 1. Read endpoint and key from the environment (.env supported)
    let config = AppraisalConfig::from_env()?;
    if config.api_key.is_none() {
        println!("⚠️  OPENROUTER_API_KEY is not set; the request will be rejected.");
    }

    let locale = std::env::args()
        .nth(1)
        .and_then(|tag| Locale::from_tag(&tag))
        .unwrap_or(Locale::English);

    // 2. Describe the property the way the form would
    let mut record = PropertyRecord::new(
        "Λεωφόρος Κύπρου 12",
        "Κομοτηνή",
        PropertyCategory::Residence,
        95.0,
        AppraisalPurpose::Sale,
    )
    .with_building(2004, "2", PropertyCondition::Good, true)
    .with_notes("Renovated kitchen, south-facing balcony.");
    toggle_feature(&mut record, PropertyFeature::Balcony)?;
    toggle_feature(&mut record, PropertyFeature::Parking)?;

    for step in WizardStep::ALL {
        let errors = validate_step(&record, step, locale);
        if !errors.is_empty() {
            println!("❌ Step {:?} is incomplete: {:?}", step, errors);
            return Ok(());
        }
    }
    println!("✅ Property record is complete.");

    // 3. Generate, printing progress events as they arrive
    let (tx, mut rx) = mpsc::channel(16);
    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            println!("   • {:?}", event);
        }
    });

    let generator = AppraisalGenerator::from_config(&config);
    let mut session = ReportSession::new(record, locale);
    let result = session
        .regenerate(&generator, config.credential(), Some(tx))
        .await
        .map(|_| ());
    printer.await?;

    if let Err(e) = result {
        println!("❌ {}", e.user_message(locale));
        return Ok(());
    }

    // 4. Export
    let Some(report) = session.report() else {
        return Ok(());
    };
    let today = Local::now().date_naive();
    for format in [ExportFormat::Pdf, ExportFormat::Json] {
        let doc = export(&session.record, report, locale, today, format)?;
        let path = doc.write_to_dir(Path::new("."))?;
        println!("💾 Saved {} ({} page(s))", path.display(), doc.page_count);
    }

    Ok(())
}
