mod create_account;
mod helpers;
