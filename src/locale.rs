//! Locale support for card titles.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Card title translations, keyed by locale code.
static TITLES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("en", "Most Used Languages"),
        ("ar", "اللغات الأكثر استخداما"),
        ("cs", "Nejpoužívanější jazyky"),
        ("de", "Meist verwendete Sprachen"),
        ("es", "Lenguajes Más Usados"),
        ("fr", "Langages les plus utilisés"),
        ("hu", "Leggyakrabban használt nyelvek"),
        ("id", "Bahasa Yang Paling Banyak Digunakan"),
        ("it", "Linguaggi più utilizzati"),
        ("ja", "最も使用されている言語"),
        ("kr", "가장 많이 사용된 언어"),
        ("nl", "Meest gebruikte talen"),
        ("pl", "Najczęściej używane języki"),
        ("pt-br", "Linguagens Mais Usadas"),
        ("pt-pt", "Linguagens Mais Usadas"),
        ("ru", "Наиболее используемые языки"),
        ("se", "Mest använda språken"),
        ("tr", "En Çok Kullanılan Diller"),
        ("uk-ua", "Найбільш уживані мови"),
        ("vi", "Ngôn Ngữ Thường Sử Dụng"),
        ("cn", "最常用的语言"),
        ("zh-tw", "最常用的語言"),
    ])
});

/// The default locale.
pub const DEFAULT_LOCALE: &str = "en";

/// Returns the set of supported locale codes.
pub fn supported() -> impl Iterator<Item = &'static str> {
    TITLES.keys().copied()
}

/// Whether a locale code is supported.
pub fn is_supported(locale: &str) -> bool {
    TITLES.contains_key(locale)
}

/// The card title for a locale, falling back to English.
pub fn card_title(locale: &str) -> &'static str {
    TITLES
        .get(locale)
        .copied()
        .unwrap_or_else(|| TITLES[DEFAULT_LOCALE])
}
