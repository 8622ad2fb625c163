use aura_core::ThemeMode;
use aura_core::theme::{ERROR_TEXT_COLOR, ThemeTokens};
use gpui::{App, Hsla, IntoElement, ParentElement, Styled, Window, div, px, rgb};
use gpui_component::Theme;

/// Theme tokens resolved to gpui colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Hsla,
    pub sidebar_background: Hsla,
    pub text: Hsla,
    pub accent: Hsla,
    pub input_background: Hsla,
    pub border: Hsla,
    pub user_message_background: Hsla,
    pub user_message_text: Hsla,
    pub ai_message_background: Hsla,
    pub ai_message_text: Hsla,
    pub error: Hsla,
}

impl Palette {
    pub fn from_tokens(tokens: &ThemeTokens) -> Self {
        Self {
            background: rgb(tokens.background).into(),
            sidebar_background: rgb(tokens.sidebar_background).into(),
            text: rgb(tokens.text_color).into(),
            accent: rgb(tokens.accent_color).into(),
            input_background: rgb(tokens.input_background).into(),
            border: rgb(tokens.border_color).into(),
            user_message_background: rgb(tokens.user_message_background).into(),
            user_message_text: rgb(tokens.user_message_color).into(),
            ai_message_background: rgb(tokens.ai_message_background).into(),
            ai_message_text: rgb(tokens.ai_message_color).into(),
            error: rgb(ERROR_TEXT_COLOR).into(),
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        Self::from_tokens(mode.tokens())
    }
}

pub fn component_mode(mode: ThemeMode) -> gpui_component::ThemeMode {
    match mode {
        ThemeMode::Light => gpui_component::ThemeMode::Light,
        ThemeMode::Dark => gpui_component::ThemeMode::Dark,
    }
}

/// Switches the component library's base theme so inputs and buttons match the palette.
pub fn apply_theme_mode(mode: ThemeMode, window: Option<&mut Window>, cx: &mut App) {
    Theme::change(component_mode(mode), window, cx);
}

/// The app mark: an accent ring around a solid core.
pub fn render_logo(palette: Palette, size: f32) -> impl IntoElement {
    div()
        .size(px(size))
        .flex_shrink_0()
        .flex()
        .items_center()
        .justify_center()
        .rounded_full()
        .border_2()
        .border_color(palette.accent)
        .child(div().size(px(size * 0.4)).rounded_full().bg(palette.accent))
}

#[cfg(test)]
mod tests {
    use aura_core::theme::{DARK_TOKENS, LIGHT_TOKENS};

    use super::*;

    #[test]
    fn palettes_differ_between_modes() {
        let light = Palette::for_mode(ThemeMode::Light);
        let dark = Palette::for_mode(ThemeMode::Dark);

        assert_ne!(light.background, dark.background);
        assert_eq!(light.user_message_text, dark.user_message_text);
        assert_eq!(light.error, dark.error);
    }

    #[test]
    fn palette_follows_tokens() {
        assert_eq!(
            Palette::from_tokens(&DARK_TOKENS).accent,
            Hsla::from(rgb(0x8B6BFF))
        );
        assert_eq!(
            Palette::from_tokens(&LIGHT_TOKENS).text,
            Hsla::from(rgb(0x1A1A1A))
        );
    }

    #[test]
    fn component_mode_tracks_dark_flag() {
        assert!(component_mode(ThemeMode::Dark).is_dark());
        assert!(!component_mode(ThemeMode::Light).is_dark());
    }
}
