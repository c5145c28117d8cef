//! Simple example of in-memory catalogs, fallback and pluralization.

use parlance_common_log::LogConfig;
use parlance_translation::{ArrayLoader, Lines, MessageValue, Replacements, Translator};
use std::sync::Arc;

fn lines(pairs: &[(&str, &str)]) -> Lines {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), MessageValue::from(*v)))
        .collect()
}

fn main() -> anyhow::Result<()> {
    parlance_common_log::init(LogConfig::from_env())?;

    println!("=== Parlance translation example ===");

    let loader = ArrayLoader::new();
    loader
        .add_messages(
            "en",
            "app",
            lines(&[
                ("welcome", "Welcome to Parlance!"),
                ("greeting", "Hello, :name!"),
                ("apples", "{0} No apples|[1] one apple|[2,*] :count apples"),
            ]),
            None,
        )
        .add_messages(
            "es",
            "app",
            lines(&[("welcome", "¡Bienvenido a Parlance!"), ("greeting", "¡Hola, :Name!")]),
            None,
        );

    let translator = Translator::new(Arc::new(loader), "en")?;
    translator.set_fallback("en");
    let none = Replacements::new();

    println!("Current locale: {}", translator.locale());
    println!("Translation: '{}'", translator.trans("app.welcome", &none, None)?);

    translator.set_locale("es")?;
    println!("Current locale: {}", translator.locale());
    println!("Translation: '{}'", translator.trans("app.welcome", &none, None)?);

    let replace = Replacements::new().with("name", "maría");
    println!("With placeholder: '{}'", translator.trans("app.greeting", &replace, None)?);

    // Not in "es", resolved through the fallback
    for count in [0, 1, 7] {
        println!("Plural ({}): '{}'", count, translator.choice("app.apples", count, &none, None)?);
    }

    println!("Missing key: '{}'", translator.trans("app.missing", &none, None)?);

    Ok(())
}
