use std::sync::OnceLock;

fn env_flag_enabled(name: &str) -> bool {
    std::env::var(name)
        .map(|value| {
            matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            )
        })
        .unwrap_or(false)
}

/// Verbose per-decision logging (`TSP_DEBUG_DECISIONS`), debug builds only.
pub fn decision_debug_enabled() -> bool {
    if !cfg!(debug_assertions) {
        return false;
    }
    static FLAG: OnceLock<bool> = OnceLock::new();
    *FLAG.get_or_init(|| env_flag_enabled("TSP_DEBUG_DECISIONS"))
}
