//! Command handlers for the homelab-memory CLI.

use std::process::ExitCode;

use homelab_memory::{
    DEFAULT_LIST_LIMIT, DEFAULT_TEXT_SEARCH_LIMIT, Error, MemoryStore, UserMemory,
};

use crate::output::*;

/// Commands supported by the homelab-memory CLI.
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Store a new memory
    Remember {
        /// Memory text content
        text: String,

        /// Tag to attach (repeatable)
        #[arg(short = 't', long = "tag")]
        tags: Vec<String>,
    },
    /// Recall memories semantically related to a query
    Recall {
        /// Search query text
        query: String,

        /// Maximum number of results (default: recall_limit from config)
        #[arg(short = 'l', long)]
        limit: Option<usize>,

        /// Minimum cosine similarity, -1.0 to 1.0 (default: min_similarity from config)
        #[arg(short = 's', long, allow_negative_numbers = true)]
        min_similarity: Option<f64>,
    },
    /// Show one memory
    Get {
        /// Memory ID
        id: String,
    },
    /// List memories, most recently updated first
    List {
        /// Only memories carrying any of these tags (repeatable)
        #[arg(short = 't', long = "tag")]
        tags: Vec<String>,

        /// Maximum number of results
        #[arg(short = 'l', long, default_value_t = DEFAULT_LIST_LIMIT)]
        limit: usize,

        /// Number of matching memories to skip
        #[arg(short = 'o', long, default_value_t = 0)]
        offset: usize,
    },
    /// Case-insensitive substring search
    Search {
        /// Text to look for
        text: String,

        /// Maximum number of results
        #[arg(short = 'l', long, default_value_t = DEFAULT_TEXT_SEARCH_LIMIT)]
        limit: usize,
    },
    /// Replace the tags of a memory (no tags clears them)
    Tag {
        /// Memory ID
        id: String,

        /// New tags
        tags: Vec<String>,
    },
    /// Delete one memory
    Forget {
        /// Memory ID
        id: String,
    },
    /// Delete every memory of the user
    ForgetAll {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Count the user's memories
    Count,
    /// List every user with stored memories
    Users,
    /// Print version information
    Version,
}

impl Commands {
    /// Whether the command needs an open store.
    pub fn needs_store(&self) -> bool {
        !matches!(self, Commands::Version)
    }
}

/// Execute a CLI command against `memory`.
pub fn execute(command: &Commands, memory: UserMemory<'_>, json: bool) -> Result<ExitCode, Error> {
    match command {
        Commands::Remember { text, tags } => handle_remember(memory, text, tags, json),
        Commands::Recall {
            query,
            limit,
            min_similarity,
        } => handle_recall(memory, query, *limit, *min_similarity, json),
        Commands::Get { id } => handle_get(memory, id, json),
        Commands::List {
            tags,
            limit,
            offset,
        } => handle_list(memory, tags, *limit, *offset, json),
        Commands::Search { text, limit } => handle_search(memory, text, *limit, json),
        Commands::Tag { id, tags } => handle_tag(memory, id, tags, json),
        Commands::Forget { id } => handle_forget(memory, id, json),
        Commands::ForgetAll { yes } => handle_forget_all(memory, *yes, json),
        Commands::Count => handle_count(memory, json),
        Commands::Users => handle_users(memory.store(), json),
        Commands::Version => handle_version(json),
    }
}

fn handle_remember(
    memory: UserMemory<'_>,
    text: &str,
    tags: &[String],
    json: bool,
) -> Result<ExitCode, Error> {
    let stored = memory.remember(text, tags)?;
    if json {
        print_json(&RememberResponse {
            status: "stored".to_string(),
            memory: stored,
        });
    } else {
        println!("Stored memory: {}", stored.id);
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_recall(
    memory: UserMemory<'_>,
    query: &str,
    limit: Option<usize>,
    min_similarity: Option<f64>,
    json: bool,
) -> Result<ExitCode, Error> {
    let hits = memory.recall(query, limit, min_similarity)?;
    if json {
        print_json(&RecallResponse {
            user_id: memory.user_id().to_string(),
            results: hits,
        });
    } else if hits.is_empty() {
        println!("No memories found");
    } else {
        for hit in hits {
            println!(
                "{} [score: {:.2}]\n  {}\n",
                hit.memory.id, hit.similarity, hit.memory.content
            );
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_get(memory: UserMemory<'_>, id: &str, json: bool) -> Result<ExitCode, Error> {
    let found = memory
        .get(id)?
        .ok_or_else(|| Error::NotFound(id.to_string()))?;
    if json {
        print_json(&found);
    } else {
        println!("ID: {}", found.id);
        println!("User: {}", found.user_id);
        println!("Content: {}", found.content);
        if !found.tags.is_empty() {
            println!("Tags: {}", found.tags.join(", "));
        }
        println!("Created: {}", found.created_at);
        println!("Updated: {}", found.updated_at);
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_list(
    memory: UserMemory<'_>,
    tags: &[String],
    limit: usize,
    offset: usize,
    json: bool,
) -> Result<ExitCode, Error> {
    let filter = (!tags.is_empty()).then_some(tags);
    let memories = memory.list_memories(filter, limit, offset)?;
    print_memories(memory, memories, json);
    Ok(ExitCode::SUCCESS)
}

fn handle_search(
    memory: UserMemory<'_>,
    text: &str,
    limit: usize,
    json: bool,
) -> Result<ExitCode, Error> {
    let memories = memory.search_by_text(text, limit)?;
    print_memories(memory, memories, json);
    Ok(ExitCode::SUCCESS)
}

fn print_memories(memory: UserMemory<'_>, memories: Vec<homelab_memory::Memory>, json: bool) {
    if json {
        print_json(&MemoriesResponse {
            user_id: memory.user_id().to_string(),
            memories,
        });
    } else {
        for item in &memories {
            print_memory_line(item);
        }
    }
}

fn handle_tag(
    memory: UserMemory<'_>,
    id: &str,
    tags: &[String],
    json: bool,
) -> Result<ExitCode, Error> {
    if !memory.update_memory_tags(id, tags)? {
        return Err(Error::NotFound(id.to_string()));
    }
    if json {
        print_json(&StatusResponse {
            status: "updated".to_string(),
            id: id.to_string(),
        });
    } else {
        println!("Updated tags of memory: {}", id);
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_forget(memory: UserMemory<'_>, id: &str, json: bool) -> Result<ExitCode, Error> {
    if !memory.forget(id)? {
        return Err(Error::NotFound(id.to_string()));
    }
    if json {
        print_json(&StatusResponse {
            status: "deleted".to_string(),
            id: id.to_string(),
        });
    } else {
        println!("Deleted memory: {}", id);
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_forget_all(memory: UserMemory<'_>, yes: bool, json: bool) -> Result<ExitCode, Error> {
    if !yes {
        return Err(Error::InvalidInput(format!(
            "refusing to delete all memories of '{}' without --yes",
            memory.user_id()
        )));
    }
    let deleted = memory.forget_all()?;
    if json {
        print_json(&ForgetAllResponse {
            status: "deleted".to_string(),
            user_id: memory.user_id().to_string(),
            deleted,
        });
    } else {
        println!("Deleted {} memories of {}", deleted, memory.user_id());
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_count(memory: UserMemory<'_>, json: bool) -> Result<ExitCode, Error> {
    let count = memory.get_memory_count()?;
    if json {
        print_json(&CountResponse {
            user_id: memory.user_id().to_string(),
            count,
        });
    } else {
        println!("{}", count);
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_users(store: &MemoryStore, json: bool) -> Result<ExitCode, Error> {
    let users = store.get_all_users()?;
    if json {
        print_json(&UsersResponse { users });
    } else {
        for user in users {
            println!("{}", user);
        }
    }
    Ok(ExitCode::SUCCESS)
}

pub fn handle_version(json: bool) -> Result<ExitCode, Error> {
    if json {
        print_json(&serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "name": env!("CARGO_PKG_NAME")
        }));
    } else {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    }
    Ok(ExitCode::SUCCESS)
}
