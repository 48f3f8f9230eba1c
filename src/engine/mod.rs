// Abacus Engine — client-side state and network wiring for the accounting
// assistant backend. All business logic (bot responses, PDF parsing,
// prediction) lives server-side; these modules own the session state,
// classify what the backend sends, and route the two one-shot forms.

pub mod accounting;
pub mod chat;
pub mod classify;
pub mod config;
pub mod invoice;
pub mod state;
pub mod types;
