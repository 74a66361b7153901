mod groq_chat_client;

pub use groq_chat_client::GroqChatClient;
