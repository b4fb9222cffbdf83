mod business;
mod identity;
