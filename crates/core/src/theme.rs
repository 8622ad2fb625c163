//! Light and dark color tokens. Only the in-memory selection changes; nothing is persisted.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    pub fn tokens(self) -> &'static ThemeTokens {
        match self {
            Self::Light => &LIGHT_TOKENS,
            Self::Dark => &DARK_TOKENS,
        }
    }
}

/// Color tokens as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeTokens {
    pub background: u32,
    pub sidebar_background: u32,
    pub text_color: u32,
    pub accent_color: u32,
    pub input_background: u32,
    pub border_color: u32,
    pub user_message_background: u32,
    pub user_message_color: u32,
    pub ai_message_background: u32,
    pub ai_message_color: u32,
}

pub const ERROR_TEXT_COLOR: u32 = 0xFF6B6B;

pub const LIGHT_TOKENS: ThemeTokens = ThemeTokens {
    background: 0xFFFFFF,
    sidebar_background: 0xF7F7F7,
    text_color: 0x1A1A1A,
    accent_color: 0x6A45FF,
    input_background: 0xF0F0F0,
    border_color: 0xE0E0E0,
    user_message_background: 0x6A45FF,
    user_message_color: 0xFFFFFF,
    ai_message_background: 0xF0F0F0,
    ai_message_color: 0x1A1A1A,
};

pub const DARK_TOKENS: ThemeTokens = ThemeTokens {
    background: 0x1A1A1A,
    sidebar_background: 0x111111,
    text_color: 0xFFFFFF,
    accent_color: 0x8B6BFF,
    input_background: 0x2A2A2A,
    border_color: 0x3A3A3A,
    user_message_background: 0x8B6BFF,
    user_message_color: 0xFFFFFF,
    ai_message_background: 0x2A2A2A,
    ai_message_color: 0xFFFFFF,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_between_the_two_token_tables() {
        let mode = ThemeMode::default();
        assert!(mode.is_dark());
        assert_eq!(mode.tokens(), &DARK_TOKENS);

        let mode = mode.toggled();
        assert_eq!(mode, ThemeMode::Light);
        assert_eq!(mode.tokens().background, 0xFFFFFF);
        assert_eq!(mode.toggled(), ThemeMode::Dark);
    }

    #[test]
    fn user_bubbles_use_the_accent_color() {
        for mode in [ThemeMode::Light, ThemeMode::Dark] {
            let tokens = mode.tokens();
            assert_eq!(tokens.user_message_background, tokens.accent_color);
        }
    }
}
