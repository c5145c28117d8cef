//! Loading catalogs from disk through the configuration layer.

use parlance_common_config::TranslationConfig;
use parlance_common_log::LogConfig;
use parlance_translation::{MessageBag, Replacements, TranslatorFactory};
use std::fs;

fn main() -> anyhow::Result<()> {
    parlance_common_log::init(LogConfig::from_env())?;

    println!("=== Parlance message loading demo ===\n");

    let dir = tempfile::tempdir()?;
    let lang = dir.path().join("lang");
    let package = dir.path().join("billing");

    fs::create_dir_all(lang.join("en"))?;
    fs::create_dir_all(lang.join("fr"))?;
    fs::create_dir_all(lang.join("vendor/billing/en"))?;
    fs::create_dir_all(package.join("en"))?;

    fs::write(
        lang.join("en/validation.yaml"),
        "required: The :attribute field is required.\nmin: At least one item.|At least :count items.\n",
    )?;
    fs::write(lang.join("fr/validation.yaml"), "required: Le champ :attribute est obligatoire.\n")?;
    fs::write(lang.join("fr.json"), r#"{"Save changes": "Enregistrer"}"#)?;
    fs::write(package.join("en/invoices.yaml"), "due: Due\npaid: Paid\n")?;
    fs::write(lang.join("vendor/billing/en/invoices.yaml"), "due: Payment due\n")?;

    let mut config = TranslationConfig::default();
    config.app.locale = "fr".to_string();
    config.app.fallback_locale = "en".to_string();
    config.paths.lang = vec![lang];
    config.namespaces.insert("billing".to_string(), package);

    let translator = TranslatorFactory::local(&config)?;
    let none = Replacements::new();

    println!("1. Grouped files:");
    let replace = Replacements::new().with("attribute", "email");
    println!("   validation.required: {}", translator.trans("validation.required", &replace, None)?);
    println!("   validation.min (fallback): {}", translator.choice("validation.min", 4, &none, None)?);
    println!();

    println!("2. Flat catalog:");
    println!("   Save changes: {}", translator.trans("Save changes", &none, None)?);
    println!();

    println!("3. Namespaces with vendor overrides:");
    println!("   billing::invoices.due: {}", translator.trans("billing::invoices.due", &none, Some("en"))?);
    println!("   billing::invoices.paid: {}", translator.trans("billing::invoices.paid", &none, Some("en"))?);
    println!();

    println!("4. Pending messages:");
    let mut bag = MessageBag::new();
    bag.pending(&translator, "email", Some("validation.required"))
        .translate(&replace, None)?
        .finish();
    for (attribute, message) in bag.keyed() {
        println!("   {}: {}", attribute, message);
    }

    Ok(())
}
