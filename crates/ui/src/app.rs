use aura_core::{SessionController, ThemeMode, Username};
use gpui::*;

use crate::auth::{AuthScreen, Authenticated};
use crate::chat::{ChatView, LogoutRequested};
use crate::services::AppServices;
use crate::theme::apply_theme_mode;

gpui::actions!(aura, [ToggleSidebar, Quit]);

pub const WINDOW_WIDTH: f32 = 1200.0;
pub const WINDOW_HEIGHT: f32 = 800.0;

enum Screen {
    Auth(Entity<AuthScreen>),
    Chat(Entity<ChatView>),
}

/// Window root: the auth screen while logged out, the chat view while logged in.
pub struct AuraApp {
    services: AppServices,
    session: Entity<SessionController>,
    screen: Screen,
}

impl AuraApp {
    pub fn new(services: AppServices, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let restored = services.restore_session();
        let current_user = restored.current_user().cloned();
        let session = cx.new(|_| restored);

        let screen = match current_user {
            Some(user) => {
                tracing::info!(user = %user, "restored session");
                Self::chat_screen(&services, user, window, cx)
            }
            None => Self::auth_screen(&services, &session, window, cx),
        };

        Self {
            services,
            session,
            screen,
        }
    }

    fn auth_screen(
        services: &AppServices,
        session: &Entity<SessionController>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Screen {
        apply_theme_mode(ThemeMode::Dark, Some(window), cx);

        let app_name = services.config.app_name.clone();
        let accounts = services.accounts();
        let session = session.clone();
        let auth = cx.new(|cx| AuthScreen::new(app_name, accounts, session, window, cx));

        cx.subscribe_in(
            &auth,
            window,
            |this, _, event: &Authenticated, window, cx| {
                this.screen = Self::chat_screen(&this.services, event.user.clone(), window, cx);
                cx.notify();
            },
        )
        .detach();

        Screen::Auth(auth)
    }

    fn chat_screen(
        services: &AppServices,
        user: Username,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Screen {
        let config = services.config.clone();
        let provider = services.provider.clone();
        let chat = cx.new(|cx| ChatView::new(user, &config, provider, window, cx));

        cx.subscribe_in(
            &chat,
            window,
            |this, _, _event: &LogoutRequested, window, cx| {
                this.logout(window, cx);
            },
        )
        .detach();

        Screen::Chat(chat)
    }

    fn logout(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let outcome = self.session.update(cx, |session, _| session.logout());
        if let Err(error) = outcome {
            tracing::error!(error = %error, "failed to clear remembered session");
        }

        self.screen = Self::auth_screen(&self.services, &self.session, window, cx);
        cx.notify();
    }
}

impl Render for AuraApp {
    fn render(&mut self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
        let content = match &self.screen {
            Screen::Auth(auth) => auth.clone().into_any_element(),
            Screen::Chat(chat) => chat.clone().into_any_element(),
        };

        div().size_full().child(content)
    }
}
