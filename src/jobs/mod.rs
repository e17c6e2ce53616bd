pub mod token_cleanup;
