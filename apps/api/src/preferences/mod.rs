// Employer matching preferences. Stored and served only; the scoring flow does not read them.

pub mod handlers;
