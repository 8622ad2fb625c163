use std::sync::Arc;

use aura_core::{AppConfig, ChatShellState, PendingTurn, Username};
use aura_llm::{LlmProvider, ProviderError, ProviderResult, Reply};
use gpui::prelude::FluentBuilder as _;
use gpui::*;
use gpui_component::{
    IconName, Sizable,
    button::{Button, ButtonVariants},
    h_flex,
    label::Label,
    v_flex,
};
use gpui_tokio_bridge::Tokio;

use crate::app::ToggleSidebar;
use crate::chat::message_input::{MessageInput, Submit};
use crate::chat::message_list::MessageList;
use crate::chat::sidebar::{
    ChatSidebar, LogoutClicked, SearchChanged, SidebarSnapshot, ThemeToggleClicked,
};
use crate::theme::{Palette, apply_theme_mode};

/// Emitted when the user asks to end the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoutRequested;

/// Chat screen: sidebar, message list, and input around one conversation.
pub struct ChatView {
    state: ChatShellState,
    app_name: SharedString,
    sidebar: Entity<ChatSidebar>,
    message_list: Entity<MessageList>,
    message_input: Entity<MessageInput>,
    request_task: Option<Task<()>>,
}

impl EventEmitter<LogoutRequested> for ChatView {}

impl ChatView {
    pub fn new(
        user: Username,
        config: &AppConfig,
        provider: Arc<dyn LlmProvider>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let state = ChatShellState::new(user, provider, &config.welcome_message);
        let app_name = SharedString::from(config.app_name.clone());
        let palette = Palette::for_mode(state.theme());

        let sidebar = cx.new(|cx| {
            ChatSidebar::new(Self::snapshot_of(&state, &app_name), window, cx)
        });
        let message_list = cx.new(|cx| MessageList::new(palette, cx));
        let message_input = cx.new(|cx| MessageInput::new(palette, window, cx));

        cx.subscribe(&message_input, |this, _, event: &Submit, cx| {
            this.handle_submit(event, cx);
        })
        .detach();

        cx.subscribe(&sidebar, |this, _, event: &SearchChanged, cx| {
            this.state.set_search_query(event.query.clone());
            this.sync_sidebar(cx);
        })
        .detach();

        cx.subscribe_in(
            &sidebar,
            window,
            |this, _, _event: &ThemeToggleClicked, window, cx| {
                this.toggle_theme(window, cx);
            },
        )
        .detach();

        cx.subscribe(&sidebar, |_, _, _event: &LogoutClicked, cx| {
            cx.emit(LogoutRequested);
        })
        .detach();

        apply_theme_mode(state.theme(), Some(window), cx);

        let this = Self {
            state,
            app_name,
            sidebar,
            message_list,
            message_input,
            request_task: None,
        };
        this.sync_messages(cx);
        this
    }

    fn snapshot_of(state: &ChatShellState, app_name: &SharedString) -> SidebarSnapshot {
        SidebarSnapshot {
            app_name: app_name.clone(),
            user: state.user().clone(),
            theme: state.theme(),
            entries: state.visible_history().into_iter().cloned().collect(),
        }
    }

    fn handle_submit(&mut self, event: &Submit, cx: &mut Context<Self>) {
        let Some(turn) = self.state.chat_mut().begin_submit(&event.content) else {
            return;
        };
        self.sync_messages(cx);

        let request = Tokio::spawn(cx, self.state.chat().request(&turn));
        self.request_task = Some(cx.spawn(async move |this, cx| {
            let outcome = match request.await {
                Ok(outcome) => outcome,
                Err(error) => Err(ProviderError::Unavailable {
                    stage: "join-chat-request",
                    reason: error.to_string(),
                }),
            };

            let _ = this.update(cx, |this, cx| {
                this.finish_turn(&turn, outcome, cx);
            });
        }));
    }

    fn finish_turn(
        &mut self,
        turn: &PendingTurn,
        outcome: ProviderResult<Reply>,
        cx: &mut Context<Self>,
    ) {
        if let Err(rejection) = self.state.chat_mut().finish(turn, outcome) {
            tracing::warn!(?rejection, "discarded stale chat reply");
        }
        self.request_task = None;
        self.sync_messages(cx);
    }

    fn toggle_theme(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let mode = self.state.toggle_theme();
        let palette = Palette::for_mode(mode);

        apply_theme_mode(mode, Some(window), cx);
        self.message_list
            .update(cx, |list, cx| list.set_palette(palette, cx));
        self.message_input
            .update(cx, |input, cx| input.set_palette(palette, cx));
        self.sync_sidebar(cx);
        cx.notify();
    }

    fn toggle_sidebar(&mut self, cx: &mut Context<Self>) {
        let open = self.state.toggle_sidebar();
        tracing::debug!(open, "toggled sidebar");
        cx.notify();
    }

    fn render_top_bar(&self, palette: Palette, cx: &Context<Self>) -> impl IntoElement {
        let toggle_icon = if self.state.sidebar_open() {
            IconName::PanelLeftClose
        } else {
            IconName::PanelLeftOpen
        };

        h_flex()
            .id("chat-view-top-bar")
            .w_full()
            .flex_shrink_0()
            .items_center()
            .gap_2()
            .px_3()
            .py_2()
            .border_b_1()
            .border_color(palette.border)
            .child(
                Button::new("sidebar-toggle")
                    .ghost()
                    .small()
                    .icon(toggle_icon)
                    .on_click(cx.listener(|this, _, _window, cx| {
                        this.toggle_sidebar(cx);
                    })),
            )
            .when(!self.state.sidebar_open(), |bar| {
                bar.child(
                    Label::new(self.app_name.clone())
                        .text_sm()
                        .font_weight(FontWeight::SEMIBOLD)
                        .text_color(palette.accent),
                )
            })
    }

    fn sync_sidebar(&self, cx: &mut Context<Self>) {
        let snapshot = Self::snapshot_of(&self.state, &self.app_name);
        self.sidebar
            .update(cx, |sidebar, cx| sidebar.set_snapshot(snapshot, cx));
    }

    fn sync_messages(&self, cx: &mut Context<Self>) {
        let chat = self.state.chat();
        let is_loading = chat.is_loading();

        self.message_list
            .update(cx, |list, cx| list.set_messages(chat.messages(), is_loading, cx));
        self.message_input
            .update(cx, |input, cx| input.set_sending(is_loading, cx));
    }
}

impl Render for ChatView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let palette = Palette::for_mode(self.state.theme());

        h_flex()
            .id("chat-view")
            .size_full()
            .min_h_0()
            .overflow_hidden()
            .bg(palette.background)
            .text_color(palette.text)
            .on_action(cx.listener(|this, _: &ToggleSidebar, _window, cx| {
                this.toggle_sidebar(cx);
            }))
            .when(self.state.sidebar_open(), |view| view.child(self.sidebar.clone()))
            .child(
                v_flex()
                    .id("chat-view-main")
                    .flex_1()
                    .h_full()
                    .min_w_0()
                    .min_h_0()
                    .child(self.render_top_bar(palette, cx))
                    .child(
                        div()
                            .id("chat-view-message-list")
                            .flex_1()
                            .min_h_0()
                            .child(self.message_list.clone()),
                    )
                    .child(
                        div()
                            .id("chat-view-message-input")
                            .flex_shrink_0()
                            .w_full()
                            .child(self.message_input.clone()),
                    ),
            )
    }
}
