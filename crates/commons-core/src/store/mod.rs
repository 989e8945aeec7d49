// ── Reactive stores ──
//
// Each store caches fetched data in `Observable` fields and exposes
// actions that call the directory API and assign the results.

mod observable;
mod program_store;
mod provider_store;

pub use observable::Observable;
pub use program_store::ProgramStore;
pub use provider_store::ProviderStore;
