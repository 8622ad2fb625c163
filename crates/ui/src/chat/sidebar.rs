use aura_core::{ChatHistoryEntry, ThemeMode, Username};
use gpui::prelude::FluentBuilder as _;
use gpui::*;
use gpui_component::{
    IconName, Sizable,
    button::{Button, ButtonVariants},
    h_flex,
    input::{Input, InputEvent, InputState},
    label::Label,
    v_flex,
};

use crate::theme::{Palette, render_logo};

const SIDEBAR_WIDTH: f32 = 260.0;
const HISTORY_ROW_HEIGHT: f32 = 36.0;
const AVATAR_SIZE: f32 = 32.0;
const PINNED_MARKER: &str = "★";
const LOGO_SIZE: f32 = 28.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchChanged {
    pub query: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeToggleClicked;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoutClicked;

/// What the sidebar renders; owned by the chat view and pushed down on change.
#[derive(Debug, Clone)]
pub struct SidebarSnapshot {
    pub app_name: SharedString,
    pub user: Username,
    pub theme: ThemeMode,
    pub entries: Vec<ChatHistoryEntry>,
}

pub struct ChatSidebar {
    search_input: Entity<InputState>,
    last_query: String,
    snapshot: SidebarSnapshot,
}

impl EventEmitter<SearchChanged> for ChatSidebar {}
impl EventEmitter<ThemeToggleClicked> for ChatSidebar {}
impl EventEmitter<LogoutClicked> for ChatSidebar {}

impl ChatSidebar {
    pub fn new(snapshot: SidebarSnapshot, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let search_input = cx.new(|cx| InputState::new(window, cx).placeholder("Search history..."));

        cx.subscribe_in(
            &search_input,
            window,
            |this, _, _event: &InputEvent, _window, cx| {
                let query = this.search_input.read(cx).value().to_string();
                if query != this.last_query {
                    this.last_query = query.clone();
                    cx.emit(SearchChanged { query });
                }
            },
        )
        .detach();

        Self {
            search_input,
            last_query: String::new(),
            snapshot,
        }
    }

    pub fn set_snapshot(&mut self, snapshot: SidebarSnapshot, cx: &mut Context<Self>) {
        self.snapshot = snapshot;
        cx.notify();
    }

    fn palette(&self) -> Palette {
        Palette::for_mode(self.snapshot.theme)
    }

    fn render_header(&self) -> impl IntoElement {
        let palette = self.palette();

        v_flex()
            .w_full()
            .gap_3()
            .px_3()
            .pt_4()
            .pb_2()
            .child(
                h_flex()
                    .gap_2()
                    .items_center()
                    .child(render_logo(palette, LOGO_SIZE))
                    .child(
                        Label::new(self.snapshot.app_name.clone())
                            .text_lg()
                            .font_weight(FontWeight::BOLD)
                            .text_color(palette.accent),
                    ),
            )
            .child(
                div()
                    .w_full()
                    .rounded_md()
                    .bg(palette.input_background)
                    .child(Input::new(&self.search_input).w_full().small()),
            )
    }

    fn render_history(&self) -> AnyElement {
        let palette = self.palette();

        if self.snapshot.entries.is_empty() {
            return v_flex()
                .flex_1()
                .items_center()
                .justify_center()
                .px_4()
                .child(
                    Label::new("No chats match your search")
                        .text_sm()
                        .text_color(palette.text.opacity(0.55)),
                )
                .into_any_element();
        }

        v_flex()
            .id("history-list")
            .flex_1()
            .min_h_0()
            .overflow_y_scroll()
            .px_2()
            .gap_1()
            .children(self.snapshot.entries.iter().map(|entry| {
                h_flex()
                    .id(("history-entry", entry.id))
                    .w_full()
                    .h(px(HISTORY_ROW_HEIGHT))
                    .px_3()
                    .gap_2()
                    .items_center()
                    .rounded_md()
                    .hover(|row| row.bg(palette.input_background))
                    .child(
                        div()
                            .flex_1()
                            .min_w_0()
                            .truncate()
                            .child(Label::new(entry.title.clone()).text_sm().text_color(palette.text)),
                    )
                    .when(entry.pinned, |row| {
                        row.child(Label::new(PINNED_MARKER).text_xs().text_color(palette.accent))
                    })
            }))
            .into_any_element()
    }

    fn render_footer(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let palette = self.palette();
        let theme_icon = if self.snapshot.theme.is_dark() {
            IconName::Sun
        } else {
            IconName::Moon
        };

        h_flex()
            .w_full()
            .min_w_0()
            .items_center()
            .justify_between()
            .gap_2()
            .px_3()
            .py_2()
            .border_t_1()
            .border_color(palette.border)
            .child(
                h_flex()
                    .min_w_0()
                    .gap_2()
                    .items_center()
                    .child(
                        div()
                            .id("sidebar-avatar")
                            .size(px(AVATAR_SIZE))
                            .flex_shrink_0()
                            .rounded_full()
                            .bg(palette.accent)
                            .flex()
                            .items_center()
                            .justify_center()
                            .child(
                                Label::new(self.snapshot.user.initial())
                                    .text_sm()
                                    .font_weight(FontWeight::BOLD)
                                    .text_color(palette.user_message_text),
                            ),
                    )
                    .child(
                        div().min_w_0().truncate().child(
                            Label::new(self.snapshot.user.to_string())
                                .text_sm()
                                .text_color(palette.text),
                        ),
                    ),
            )
            .child(
                h_flex()
                    .items_center()
                    .gap_1()
                    .child(
                        Button::new("sidebar-theme-toggle")
                            .ghost()
                            .small()
                            .icon(theme_icon)
                            .on_click(cx.listener(|_, _, _, cx| {
                                cx.emit(ThemeToggleClicked);
                            })),
                    )
                    .child(
                        Button::new("sidebar-logout")
                            .ghost()
                            .small()
                            .child("Logout")
                            .on_click(cx.listener(|_, _, _, cx| {
                                cx.emit(LogoutClicked);
                            })),
                    ),
            )
    }
}

impl Render for ChatSidebar {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let palette = self.palette();

        v_flex()
            .h_full()
            .w(px(SIDEBAR_WIDTH))
            .flex_shrink_0()
            .min_w_0()
            .overflow_hidden()
            .bg(palette.sidebar_background)
            .border_r_1()
            .border_color(palette.border)
            .child(self.render_header())
            .child(self.render_history())
            .child(self.render_footer(cx))
    }
}
