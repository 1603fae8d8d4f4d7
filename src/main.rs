// Copyright (c) 2026 rezky_nightky

mod app;
mod cell;
mod charset;
mod chat;
mod column;
mod frame;
mod rain;
mod store;
mod terminal;

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::app::App;
use crate::store::{MessageStore, DB_FILE};
use crate::terminal::restore_terminal_best_effort;

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        restore_terminal_best_effort();
        eprintln!("{}", info);
    }));

    let shutdown = Arc::new(AtomicBool::new(false));

    #[cfg(unix)]
    {
        use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
        for sig in [SIGINT, SIGTERM, SIGHUP] {
            if let Err(e) = signal_hook::flag::register(sig, Arc::clone(&shutdown)) {
                eprintln!("failed to install handler for signal {}: {}", sig, e);
            }
        }
    }

    #[cfg(windows)]
    {
        let flag = Arc::clone(&shutdown);
        if let Err(e) = ctrlc::set_handler(move || {
            flag.store(true, std::sync::atomic::Ordering::SeqCst);
        }) {
            eprintln!("failed to install Ctrl-C handler: {}", e);
        }
    }

    let db = MessageStore::open(DB_FILE);
    let store = match db {
        Ok(s) => s,
        Err(e) => {
            eprintln!("failed to open {}: {}", DB_FILE, e);
            std::process::exit(1);
        }
    };

    let mut app = App::new(store)?;
    let result = app.run(&shutdown);

    // Dropping the app restores the terminal and closes the store before the
    // farewell line goes out.
    drop(app);
    println!("\nExiting the rain...");

    result
}
