#![cfg(test)]

mod fakes;
mod recon;
mod tools;
