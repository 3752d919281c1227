// Multi-turn conversation memory
// Author: kelexine (https://github.com/kelexine)

mod memory;

pub use memory::ConversationMemory;
