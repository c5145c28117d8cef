//! Message translation for Parlance.
//!
//! Messages are looked up by key (`[namespace::]group[.item]`) across an
//! ordered list of catalog sources and a locale fallback chain, then have
//! their `:placeholders` substituted and, for counted messages, a plural
//! form selected.
//!
//! ```no_run
//! use parlance_common_config::ConfigLoader;
//! use parlance_translation::{Replacements, TranslatorFactory};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = ConfigLoader::new(".").load()?;
//! let translator = TranslatorFactory::local(&config)?;
//!
//! let replace = Replacements::new().with("name", "Ada");
//! println!("{}", translator.trans("messages.welcome", &replace, None)?);
//! println!("{}", translator.choice("messages.apples", 3, &Replacements::new(), None)?);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod error;
pub mod factory;
pub mod functions;
pub mod key;
pub mod loader;
pub mod locale;
pub mod pending;
pub mod plural;
pub mod replace;
pub mod translator;
pub mod tree;

pub use cache::LoadedCatalogs;
pub use error::{I18nError, Result};
pub use factory::TranslatorFactory;
pub use functions::{install, trans_choice, translate, translator, uninstall, Translated};
pub use key::{parse_key, ParsedKey};
pub use loader::{ArrayLoader, FileLoader, Loader};
pub use locale::{fallback_chain, LocaleGuard, LocaleStore, ThreadLocaleStore};
pub use pending::{MessageBag, PendingTranslation, PotentiallyTranslatedString};
pub use plural::{Count, MessageSelector, PluralFamily, PluralSelector};
pub use replace::{make_replacements, Replacements, StringableRegistry};
pub use translator::Translator;
pub use tree::{Lines, MessageValue};
