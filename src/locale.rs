//! Locale context resolved from the process environment.
//!
//! Two things matter to the greeter: which languages to look up translated
//! text in, and which character set output bytes must be encoded in. Both are
//! resolved once, up front, and passed around as a [`Locale`] value.

use std::{borrow::Cow, ffi::OsString, fmt};

use encoding_rs::{EncoderResult, Encoding};

use crate::error::ConversionError;

/// Output character sets the greeter knows how to produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Charset {
    /// UTF-8, any Unicode scalar value.
    Utf8,
    /// ISO-8859-1, code points up to U+00FF.
    Latin1,
    /// 7-bit ASCII, the `C`/`POSIX` locale.
    Ascii,
    /// Any other ASCII-compatible codeset `encoding_rs` can convert
    /// (`ISO-8859-2`, `KOI8-R`, `EUC-JP`...).
    Encoded(&'static Encoding),
}

impl Charset {
    /// Map a locale codeset name onto a charset.
    ///
    /// Spelling variants such as `utf8`, `UTF-8`, `iso88592` and `eucJP` are
    /// accepted. Codesets with no usable converter fall back to
    /// [`Charset::Ascii`], the subset every codeset shares.
    #[must_use]
    pub fn from_codeset(codeset: &str) -> Self {
        let normalized: String = codeset
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | '.'))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "utf8" => Self::Utf8,
            "iso88591" | "latin1" | "l1" => Self::Latin1,
            "c" | "posix" | "ascii" | "usascii" | "ansix341968" => Self::Ascii,
            "latin9" => Self::Encoded(encoding_rs::ISO_8859_15),
            _ => Self::lookup(codeset, &normalized),
        }
    }

    /// Resolve a codeset through `encoding_rs` labels. glibc and BSD spell
    /// codesets without the dashes the labels use, so those are restored.
    fn lookup(codeset: &str, normalized: &str) -> Self {
        let relabeled = [("iso8859", "iso-8859-"), ("euc", "euc-"), ("koi8", "koi8-")]
            .into_iter()
            .find_map(|(prefix, label)| {
                normalized
                    .strip_prefix(prefix)
                    .filter(|rest| !rest.is_empty())
                    .map(|rest| format!("{label}{rest}"))
            });
        let encoding = [Some(codeset), relabeled.as_deref(), Some(normalized)]
            .into_iter()
            .flatten()
            .find_map(|label| Encoding::for_label(label.as_bytes()));
        match encoding {
            Some(encoding) if encoding == encoding_rs::UTF_8 => Self::Utf8,
            Some(encoding) if encoding.is_ascii_compatible() && encoding.output_encoding() == encoding => {
                Self::Encoded(encoding)
            }
            _ => {
                tracing::debug!(codeset, "no converter for codeset, using ASCII");
                Self::Ascii
            }
        }
    }

    /// True if every character of `text` has an encoding in this charset.
    #[must_use]
    pub fn can_encode(self, text: &str) -> bool {
        match self {
            Self::Utf8 => true,
            Self::Ascii => text.is_ascii(),
            Self::Latin1 => text.chars().all(|c| u32::from(c) <= 0xFF),
            Self::Encoded(_) => self.encode(text).is_ok(),
        }
    }

    /// Interpret raw bytes (a command line argument) in this charset.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::InvalidSequence`] if the bytes are not a
    /// valid sequence in this charset.
    pub fn decode(self, bytes: &[u8]) -> Result<Cow<'_, str>, ConversionError> {
        if self == Self::Utf8 || bytes.is_ascii() {
            return std::str::from_utf8(bytes)
                .map(Cow::Borrowed)
                .map_err(|_| ConversionError::InvalidSequence);
        }
        match self {
            Self::Latin1 => Ok(Cow::Owned(bytes.iter().copied().map(char::from).collect())),
            Self::Encoded(encoding) => encoding
                .decode_without_bom_handling_and_without_replacement(bytes)
                .ok_or(ConversionError::InvalidSequence),
            Self::Utf8 | Self::Ascii => Err(ConversionError::InvalidSequence),
        }
    }

    /// Encode text into this charset's bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::Unrepresentable`] naming the first character
    /// outside the charset.
    pub fn encode(self, text: &str) -> Result<Cow<'_, [u8]>, ConversionError> {
        if self == Self::Utf8 || text.is_ascii() {
            return Ok(Cow::Borrowed(text.as_bytes()));
        }
        let unrepresentable = |ch| ConversionError::Unrepresentable { ch, charset: self };
        match self {
            Self::Latin1 => text
                .chars()
                .map(|ch| u8::try_from(u32::from(ch)).map_err(|_| unrepresentable(ch)))
                .collect::<Result<Vec<u8>, _>>()
                .map(Cow::Owned),
            Self::Encoded(encoding) => encode_with(encoding, text)
                .map(Cow::Owned)
                .map_err(unrepresentable),
            Self::Utf8 | Self::Ascii => Err(text
                .chars()
                .find(|c| !c.is_ascii())
                .map_or(ConversionError::InvalidSequence, unrepresentable)),
        }
    }
}

/// Encode `text` without replacement, returning the first unmappable
/// character on failure.
fn encode_with(encoding: &'static Encoding, text: &str) -> Result<Vec<u8>, char> {
    let mut encoder = encoding.new_encoder();
    let mut out = Vec::with_capacity(text.len() + 8);
    let mut rest = text;
    loop {
        let (result, read) = encoder.encode_from_utf8_to_vec_without_replacement(rest, &mut out, true);
        rest = &rest[read..];
        match result {
            EncoderResult::InputEmpty => return Ok(out),
            EncoderResult::OutputFull => out.reserve(rest.len() + 8),
            EncoderResult::Unmappable(ch) => return Err(ch),
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Utf8 => "UTF-8",
            Self::Latin1 => "ISO-8859-1",
            Self::Ascii => "ASCII",
            Self::Encoded(encoding) => encoding.name(),
        })
    }
}

/// A parsed `language[_territory][.codeset][@modifier]` locale name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocaleName {
    language: String,
    territory: Option<String>,
    codeset: Option<String>,
}

impl LocaleName {
    /// Parse a locale name. Returns `None` for an empty name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.split('@').next().unwrap_or_default();
        let (rest, codeset) = match name.split_once('.') {
            Some((rest, codeset)) => (rest, Some(codeset.to_owned())),
            None => (name, None),
        };
        let (language, territory) = match rest.split_once('_') {
            Some((language, territory)) => (language, Some(territory.to_owned())),
            None => (rest, None),
        };
        if language.is_empty() {
            return None;
        }
        Some(Self {
            language: language.to_owned(),
            territory,
            codeset,
        })
    }

    /// The language part, e.g. `de` for `de_AT.UTF-8`.
    #[must_use]
    pub fn language(&self) -> &str { &self.language }

    /// The territory part, e.g. `AT` for `de_AT.UTF-8`.
    #[must_use]
    pub fn territory(&self) -> Option<&str> { self.territory.as_deref() }

    /// True for the `C` and `POSIX` locales, which never translate.
    #[must_use]
    pub fn is_posix(&self) -> bool { self.language == "C" || self.language == "POSIX" }

    /// Character set implied by this locale name.
    ///
    /// `C`/`POSIX` without a codeset is ASCII; any other locale without a
    /// codeset is taken to be UTF-8.
    #[must_use]
    pub fn charset(&self) -> Charset {
        match (&self.codeset, self.is_posix()) {
            (Some(codeset), _) => Charset::from_codeset(codeset),
            (None, true) => Charset::Ascii,
            (None, false) => Charset::Utf8,
        }
    }
}

/// Locale context for one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Locale {
    languages: Vec<LocaleName>,
    charset: Charset,
}

impl Locale {
    /// Build a locale from a single name, as if `LC_ALL` were set to it.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        let parsed = LocaleName::parse(name);
        let charset = parsed.as_ref().map_or(Charset::Utf8, LocaleName::charset);
        Self {
            languages: parsed.into_iter().filter(|l| !l.is_posix()).collect(),
            charset,
        }
    }

    /// The untranslated `C` locale with ASCII output.
    #[must_use]
    pub fn posix() -> Self { Self::parse("C") }

    /// Resolve the locale from environment variables.
    ///
    /// `lookup` is called with a variable name and returns its value, so
    /// callers decide where the environment comes from. Messages follow
    /// `LC_ALL`, `LC_MESSAGES`, `LANG`, with the `LANGUAGE` list taking
    /// priority unless that locale is `C`; the charset follows `LC_ALL`,
    /// `LC_CTYPE`, `LANG`. With nothing set at all, output is UTF-8.
    pub fn from_env<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let first_set = |vars: &[&str]| {
            vars.iter().find_map(|var| {
                lookup(*var)
                    .and_then(|value| value.into_string().ok())
                    .filter(|value| !value.is_empty())
            })
        };

        let messages = first_set(&["LC_ALL", "LC_MESSAGES", "LANG"])
            .and_then(|name| LocaleName::parse(&name));
        let charset = first_set(&["LC_ALL", "LC_CTYPE", "LANG"])
            .and_then(|name| LocaleName::parse(&name))
            .map_or(Charset::Utf8, |name| name.charset());

        let mut languages = Vec::new();
        if let Some(messages) = messages.filter(|m| !m.is_posix()) {
            if let Some(list) = first_set(&["LANGUAGE"]) {
                languages.extend(list.split(':').filter_map(LocaleName::parse));
            }
            languages.push(messages);
        }

        tracing::debug!(
            languages = ?languages.iter().map(LocaleName::language).collect::<Vec<_>>(),
            %charset,
            "resolved locale"
        );
        Self { languages, charset }
    }

    /// Candidate languages for translation, most preferred first.
    #[must_use]
    pub fn languages(&self) -> &[LocaleName] { &self.languages }

    /// Charset output must be encoded in.
    #[must_use]
    pub fn charset(&self) -> Charset { self.charset }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rstest::rstest;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<OsString> {
        let vars: HashMap<String, OsString> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), OsString::from(v)))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[rstest]
    #[case("UTF-8", Charset::Utf8)]
    #[case("utf8", Charset::Utf8)]
    #[case("ISO-8859-1", Charset::Latin1)]
    #[case("iso88591", Charset::Latin1)]
    #[case("ANSI_X3.4-1968", Charset::Ascii)]
    #[case("ISO-8859-15", Charset::Encoded(encoding_rs::ISO_8859_15))]
    #[case("latin9", Charset::Encoded(encoding_rs::ISO_8859_15))]
    #[case("ISO-8859-2", Charset::Encoded(encoding_rs::ISO_8859_2))]
    #[case("iso88592", Charset::Encoded(encoding_rs::ISO_8859_2))]
    #[case("ISO8859-2", Charset::Encoded(encoding_rs::ISO_8859_2))]
    #[case("KOI8-R", Charset::Encoded(encoding_rs::KOI8_R))]
    #[case("koi8r", Charset::Encoded(encoding_rs::KOI8_R))]
    #[case("CP1251", Charset::Encoded(encoding_rs::WINDOWS_1251))]
    #[case("EUC-JP", Charset::Encoded(encoding_rs::EUC_JP))]
    #[case("eucJP", Charset::Encoded(encoding_rs::EUC_JP))]
    #[case("ARMSCII-8", Charset::Ascii)]
    #[case("ISO-2022-JP", Charset::Ascii)]
    fn codeset_spellings(#[case] codeset: &str, #[case] expected: Charset) {
        assert_eq!(Charset::from_codeset(codeset), expected);
    }

    #[test]
    fn parses_full_locale_name() {
        let name = LocaleName::parse("pt_BR.UTF-8@euro").expect("valid name");
        assert_eq!(name.language(), "pt");
        assert_eq!(name.territory(), Some("BR"));
        assert_eq!(name.charset(), Charset::Utf8);
    }

    #[test]
    fn lc_all_beats_lc_messages_and_lang() {
        let locale = Locale::from_env(env(&[
            ("LC_ALL", "fr_FR.UTF-8"),
            ("LC_MESSAGES", "de_DE.UTF-8"),
            ("LANG", "es_ES.UTF-8"),
        ]));
        let languages: Vec<_> = locale.languages().iter().map(LocaleName::language).collect();
        assert_eq!(languages, ["fr"]);
    }

    #[test]
    fn empty_variables_are_skipped() {
        let locale = Locale::from_env(env(&[("LC_ALL", ""), ("LANG", "de_DE.ISO-8859-1")]));
        assert_eq!(locale.languages()[0].language(), "de");
        assert_eq!(locale.charset(), Charset::Latin1);
    }

    #[test]
    fn language_list_is_ignored_for_posix_messages() {
        let locale = Locale::from_env(env(&[("LANG", "C"), ("LANGUAGE", "de:fr")]));
        assert!(locale.languages().is_empty());
        assert_eq!(locale.charset(), Charset::Ascii);
    }

    #[test]
    fn language_list_takes_priority() {
        let locale = Locale::from_env(env(&[("LANG", "en_US.UTF-8"), ("LANGUAGE", "sv:de")]));
        let languages: Vec<_> = locale.languages().iter().map(LocaleName::language).collect();
        assert_eq!(languages, ["sv", "de", "en"]);
    }

    #[test]
    fn unset_environment_is_utf8_and_untranslated() {
        let locale = Locale::from_env(env(&[]));
        assert!(locale.languages().is_empty());
        assert_eq!(locale.charset(), Charset::Utf8);
    }

    #[test]
    fn latin1_round_trips_high_bytes() {
        let text = Charset::Latin1.decode(b"caf\xe9").expect("latin1 accepts any byte");
        assert_eq!(text, "café");
        assert_eq!(
            Charset::Latin1.encode(&text).expect("é fits latin1").as_ref(),
            b"caf\xe9"
        );
    }

    #[test]
    fn latin9_uses_its_reassigned_positions() {
        let latin9 = Charset::from_codeset("ISO-8859-15");
        assert_eq!(
            latin9.encode("10\u{20AC} für Œuvres").expect("fits latin9").as_ref(),
            b"10\xa4 f\xfcr \xbcuvres"
        );
        assert_eq!(latin9.decode(b"\xa4\xe4").expect("latin9 bytes"), "\u{20AC}ä");
        assert!(!latin9.can_encode("\u{00A4}"));
        assert!(Charset::Latin1.can_encode("\u{00A4}"));
    }

    #[rstest]
    #[case("ISO-8859-2", b"\xbf\xf3\xb3w", "żółw")]
    #[case("KOI8-R", b"\xd0\xd2\xc9\xd7\xc5\xd4", "привет")]
    #[case("CP1251", b"\xef\xf0\xe8\xe2\xe5\xf2", "привет")]
    #[case("EUC-JP", b"\xa4\xb3\xa4\xf3\xa4\xcb\xa4\xc1\xa4\xcf", "こんにちは")]
    fn legacy_codesets_round_trip(#[case] codeset: &str, #[case] bytes: &[u8], #[case] text: &str) {
        let charset = Charset::from_codeset(codeset);
        let decoded = charset.decode(bytes).expect("valid in its own codeset");
        assert_eq!(decoded, text);
        assert_eq!(charset.encode(&decoded).expect("encodable").as_ref(), bytes);
    }

    #[rstest]
    #[case(Charset::Utf8, b"\xff\xfe")]
    #[case(Charset::Ascii, "héllo".as_bytes())]
    #[case(Charset::Encoded(encoding_rs::EUC_JP), b"\xa4")]
    fn invalid_sequences_are_rejected(#[case] charset: Charset, #[case] bytes: &[u8]) {
        assert_eq!(charset.decode(bytes), Err(ConversionError::InvalidSequence));
    }

    #[test]
    fn unrepresentable_character_is_reported() {
        assert_eq!(
            Charset::Latin1.encode("Witaj, świecie!"),
            Err(ConversionError::Unrepresentable {
                ch: 'ś',
                charset: Charset::Latin1,
            })
        );
        assert_eq!(
            Charset::from_codeset("KOI8-R").encode("żółw"),
            Err(ConversionError::Unrepresentable {
                ch: 'ż',
                charset: Charset::Encoded(encoding_rs::KOI8_R),
            })
        );
    }
}
