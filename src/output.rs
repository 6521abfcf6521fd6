//! JSON response types and formatting for CLI output.

use serde::Serialize;

use homelab_memory::{Memory, RecallHit};

/// Response for a stored memory.
#[derive(Serialize)]
pub struct RememberResponse {
    pub status: String,
    pub memory: Memory,
}

/// Response for semantic recall.
#[derive(Serialize)]
pub struct RecallResponse {
    pub user_id: String,
    pub results: Vec<RecallHit>,
}

/// Response for listing and substring search.
#[derive(Serialize)]
pub struct MemoriesResponse {
    pub user_id: String,
    pub memories: Vec<Memory>,
}

/// Response for single-memory mutations (tag, forget).
#[derive(Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub id: String,
}

/// Response for bulk deletion.
#[derive(Serialize)]
pub struct ForgetAllResponse {
    pub status: String,
    pub user_id: String,
    pub deleted: usize,
}

/// Response for memory count.
#[derive(Serialize)]
pub struct CountResponse {
    pub user_id: String,
    pub count: usize,
}

/// Response for the list of users.
#[derive(Serialize)]
pub struct UsersResponse {
    pub users: Vec<String>,
}

/// Response for errors.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Print a value as formatted JSON to stdout.
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print one memory in the human-readable list format.
pub fn print_memory_line(memory: &Memory) {
    if memory.tags.is_empty() {
        println!("{}: {}", memory.id, memory.content);
    } else {
        println!("{}: {} [{}]", memory.id, memory.content, memory.tags.join(", "));
    }
}
