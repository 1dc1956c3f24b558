//! Built-in message catalog.
//!
//! Only the greeting texts are translated. Lookups walk the locale's language
//! list, trying `language_TERRITORY` before the bare language, and fall back
//! to the untranslated message id. A translation the locale's charset cannot
//! encode is passed over, so a mismatched `LC_CTYPE` degrades to English
//! instead of failing.

use crate::locale::{Locale, LocaleName};

/// Translatable messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Message {
    /// The default greeting.
    Greeting,
    /// The traditional greeting: lowercase, no trailing punctuation.
    TraditionalGreeting,
}

impl Message {
    /// Untranslated text, also used as the catalog key.
    #[must_use]
    pub fn msgid(self) -> &'static str {
        match self {
            Self::Greeting => "Hello, world!",
            Self::TraditionalGreeting => "hello, world",
        }
    }
}

struct Entry {
    locale: &'static str,
    greeting: &'static str,
    traditional: &'static str,
}

const CATALOG: &[Entry] = &[
    Entry { locale: "de", greeting: "Hallo, Welt!", traditional: "hallo, welt" },
    Entry { locale: "eo", greeting: "Saluton, mondo!", traditional: "saluton, mondo" },
    Entry { locale: "es", greeting: "¡Hola, mundo!", traditional: "hola, mundo" },
    Entry { locale: "fr", greeting: "Bonjour, le monde !", traditional: "bonjour, le monde" },
    Entry { locale: "it", greeting: "Ciao, mondo!", traditional: "ciao, mondo" },
    Entry { locale: "nl", greeting: "Hallo, wereld!", traditional: "hallo, wereld" },
    Entry { locale: "pl", greeting: "Witaj, świecie!", traditional: "witaj, świecie" },
    Entry { locale: "pt", greeting: "Olá, mundo!", traditional: "olá, mundo" },
    Entry { locale: "pt_BR", greeting: "Olá, mundo!", traditional: "oi, mundo" },
    Entry { locale: "sv", greeting: "Hej, världen!", traditional: "hej, världen" },
];

fn lookup(key: &str) -> Option<&'static Entry> { CATALOG.iter().find(|e| e.locale == key) }

fn entry_for(name: &LocaleName) -> Option<&'static Entry> {
    name.territory()
        .and_then(|territory| lookup(&format!("{}_{territory}", name.language())))
        .or_else(|| lookup(name.language()))
}

impl Entry {
    fn text(&self, message: Message) -> &'static str {
        match message {
            Message::Greeting => self.greeting,
            Message::TraditionalGreeting => self.traditional,
        }
    }
}

/// Translate `message` for `locale`.
///
/// The result is always encodable in `locale.charset()`.
#[must_use]
pub fn gettext(message: Message, locale: &Locale) -> &'static str {
    let charset = locale.charset();
    locale
        .languages()
        .iter()
        .filter_map(entry_for)
        .map(|entry| entry.text(message))
        .find(|text| {
            let fits = charset.can_encode(text);
            if !fits {
                tracing::debug!(%charset, text, "translation not representable, skipping");
            }
            fits
        })
        .unwrap_or_else(|| message.msgid())
}
