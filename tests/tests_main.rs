#[path = "helpers/mod.rs"]
mod helpers;

#[path = "prototypes/mod.rs"]
mod prototypes;

#[path = "tokenization/mod.rs"]
mod tokenization;
