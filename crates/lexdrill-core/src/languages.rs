//! Known language codes and their display names.

/// ISO codes probed during retrieval, with English display names.
pub const KNOWN_LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("zh", "Chinese"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("ar", "Arabic"),
    ("hi", "Hindi"),
    ("bn", "Bengali"),
    ("tr", "Turkish"),
    ("nl", "Dutch"),
    ("pl", "Polish"),
    ("sv", "Swedish"),
    ("da", "Danish"),
    ("no", "Norwegian"),
    ("fi", "Finnish"),
    ("el", "Greek"),
    ("he", "Hebrew"),
    ("th", "Thai"),
    ("vi", "Vietnamese"),
    ("id", "Indonesian"),
    ("ms", "Malay"),
    ("sw", "Swahili"),
    ("fa", "Persian"),
    ("uk", "Ukrainian"),
    ("cs", "Czech"),
    ("ro", "Romanian"),
    ("hu", "Hungarian"),
    ("sk", "Slovak"),
    ("bg", "Bulgarian"),
    ("hr", "Croatian"),
    ("sr", "Serbian"),
    ("sl", "Slovenian"),
    ("lt", "Lithuanian"),
    ("lv", "Latvian"),
    ("et", "Estonian"),
    ("ga", "Irish"),
    ("cy", "Welsh"),
    ("eu", "Basque"),
    ("ca", "Catalan"),
    ("gl", "Galician"),
    ("af", "Afrikaans"),
    ("zu", "Zulu"),
    ("xh", "Xhosa"),
    ("st", "Southern Sotho"),
    ("tn", "Tswana"),
    ("ss", "Swati"),
    ("ve", "Venda"),
    ("ts", "Tsonga"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("kn", "Kannada"),
    ("ml", "Malayalam"),
    ("mr", "Marathi"),
    ("gu", "Gujarati"),
    ("pa", "Punjabi"),
    ("or", "Odia"),
    ("as", "Assamese"),
    ("ne", "Nepali"),
    ("si", "Sinhala"),
    ("my", "Burmese"),
    ("km", "Khmer"),
    ("lo", "Lao"),
    ("ka", "Georgian"),
    ("hy", "Armenian"),
    ("az", "Azerbaijani"),
    ("kk", "Kazakh"),
    ("uz", "Uzbek"),
    ("ky", "Kyrgyz"),
    ("tg", "Tajik"),
    ("tk", "Turkmen"),
    ("mn", "Mongolian"),
    ("ps", "Pashto"),
    ("ku", "Kurdish"),
    ("sd", "Sindhi"),
    ("ur", "Urdu"),
    ("am", "Amharic"),
    ("ti", "Tigrinya"),
    ("om", "Oromo"),
    ("so", "Somali"),
    ("ha", "Hausa"),
    ("yo", "Yoruba"),
    ("ig", "Igbo"),
    ("ff", "Fulah"),
    ("rw", "Kinyarwanda"),
    ("sn", "Shona"),
    ("ny", "Chichewa"),
    ("mg", "Malagasy"),
    ("mt", "Maltese"),
    ("is", "Icelandic"),
    ("fy", "Western Frisian"),
    ("gd", "Scottish Gaelic"),
    ("br", "Breton"),
    ("co", "Corsican"),
    ("lb", "Luxembourgish"),
    ("li", "Limburgish"),
    ("oc", "Occitan"),
    ("sc", "Sardinian"),
    ("sq", "Albanian"),
    ("bs", "Bosnian"),
    ("mk", "Macedonian"),
];

/// Display name of a known code.
pub fn language_name(code: &str) -> Option<&'static str> {
    KNOWN_LANGUAGES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, name)| *name)
}

/// Display name, or the upper-cased code when it is not in the table.
pub fn display_name(code: &str) -> String {
    language_name(code)
        .map(str::to_string)
        .unwrap_or_else(|| code.to_uppercase())
}

/// Every known code, in table order.
pub fn known_codes() -> Vec<String> {
    KNOWN_LANGUAGES
        .iter()
        .map(|(code, _)| code.to_string())
        .collect()
}
