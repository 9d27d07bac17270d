mod counters;
mod hashmap;
mod repository;
mod summaries;

pub use counters::{DualWriteCounters, InMemoryCounterStore};
pub use hashmap::HashMapDeckRepository;
pub use repository::{CounterStore, DeckRepository, SummaryStore};
pub use summaries::InMemorySummaryStore;
