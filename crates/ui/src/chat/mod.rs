pub mod message_input;
/// Message bubbles, typing indicator, and tail-following scroll.
pub mod message_list;
pub mod scroll_manager;
pub mod sidebar;
pub mod view;

pub use message_input::{MessageInput, Submit};
pub use message_list::MessageList;
pub use scroll_manager::ScrollManager;
pub use sidebar::{
    ChatSidebar, LogoutClicked, SearchChanged, SidebarSnapshot, ThemeToggleClicked,
};
pub use view::{ChatView, LogoutRequested};
