use super::ColorError;

/// The color of languages missing from the palette.
pub const DEFAULT_LANGUAGE_COLOR: &str = "#cccccc";

const LANGUAGE_COLORS: &[(&str, &str)] = &[
    ("JavaScript", "#f1e05a"),
    ("Python", "#3572a5"),
    ("Java", "#b07219"),
    ("TypeScript", "#2b7489"),
    ("HTML", "#e34c26"),
    ("CSS", "#563d7c"),
    ("PHP", "#4f5d95"),
    ("C", "#555555"),
    ("C++", "#f34b7d"),
    ("Go", "#00add8"),
    ("Rust", "#dea584"),
    ("Swift", "#ffac45"),
    ("Kotlin", "#f18e33"),
    ("Dart", "#00b4ab"),
    ("Ruby", "#701516"),
    ("Shell", "#89e051"),
];

/// Retrieves the GitHub color of a language.
pub fn language_color(language: Option<&str>) -> &'static str {
    language
        .and_then(|language| {
            LANGUAGE_COLORS
                .iter()
                .find(|(name, _)| *name == language)
                .map(|(_, color)| *color)
        })
        .unwrap_or(DEFAULT_LANGUAGE_COLOR)
}

/// Adds `amount` to each channel of a `rrggbb` color, with or without a leading `#`.
///
/// Channels are clamped to `0..=255` and the output keeps the prefix style of the input.
pub fn adjust_brightness(color: &str, amount: i32) -> Result<String, ColorError> {
    let (prefix, digits) = match color.strip_prefix('#') {
        Some(digits) => ("#", digits),
        None => ("", color),
    };
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorError::Invalid(color.to_string()));
    }
    let value =
        u32::from_str_radix(digits, 16).map_err(|_| ColorError::Invalid(color.to_string()))?;
    let adjust = |shift: u32| {
        let channel = ((value >> shift) & 0xff) as i32;
        channel.saturating_add(amount).clamp(0, 255) as u32
    };
    let adjusted = (adjust(16) << 16) | (adjust(8) << 8) | adjust(0);

    Ok(format!("{prefix}{adjusted:06x}"))
}
