pub mod chat_input;
pub mod chat_message;
pub mod chat_window;
pub mod message_list;
