//! Terminal stand-ins for the browser side effects: the dashboard URL goes to
//! stdout, failures go to stderr.

use crate::auth::{Navigator, Notifier};

#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn navigate(&self, url: &str) {
        println!("{url}");
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        eprintln!("Login failed with error: {message}");
    }
}
