use crate::domain::ColorToken;
use ratatui::style::Color;

/// Terminal colour for an endpoint colour token.
///
/// Understands `rgb(r, g, b)`, `rgba(r, g, b, a)`, `#rrggbb` and `#rgb`; the
/// alpha channel is dropped. Anything else renders gray.
pub fn token_color(token: &ColorToken) -> Color {
    parse_token(token.as_str()).unwrap_or(Color::Gray)
}

fn parse_token(token: &str) -> Option<Color> {
    let token = token.trim();
    if let Some(hex) = token.strip_prefix('#') {
        return parse_hex(hex);
    }

    let inner = token
        .strip_prefix("rgba(")
        .or_else(|| token.strip_prefix("rgb("))?
        .strip_suffix(')')?;
    let mut channels = inner.split(',').map(|part| part.trim().parse::<u8>().ok());
    let r = channels.next()??;
    let g = channels.next()??;
    let b = channels.next()??;
    Some(Color::Rgb(r, g, b))
}

fn parse_hex(hex: &str) -> Option<Color> {
    match hex.len() {
        6 => {
            let value = u32::from_str_radix(hex, 16).ok()?;
            let [_, r, g, b] = value.to_be_bytes();
            Some(Color::Rgb(r, g, b))
        }
        3 => {
            let mut digits = hex.chars().map(|c| c.to_digit(16));
            let mut next = || digits.next().flatten().and_then(|d| u8::try_from(d * 17).ok());
            Some(Color::Rgb(next()?, next()?, next()?))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_the_token_forms_the_endpoints_send() {
        assert_eq!(
            token_color(&ColorToken::new("rgb(54, 162, 235)")),
            Color::Rgb(54, 162, 235)
        );
        assert_eq!(
            token_color(&ColorToken::new("rgba(255, 99, 132, 0.6)")),
            Color::Rgb(255, 99, 132)
        );
        assert_eq!(token_color(&ColorToken::new("#ff9f40")), Color::Rgb(255, 159, 64));
        assert_eq!(token_color(&ColorToken::new("#f0a")), Color::Rgb(255, 0, 170));
    }

    #[test]
    fn unknown_tokens_fall_back_to_gray() {
        assert_eq!(token_color(&ColorToken::new("teal")), Color::Gray);
        assert_eq!(token_color(&ColorToken::new("rgb(300, 0, 0)")), Color::Gray);
    }
}
