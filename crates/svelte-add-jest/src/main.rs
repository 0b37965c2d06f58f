//! svelte-add-jest - Add Jest testing support to a Svelte project

use adder_core::{AdderArgs, RunArgs};
use anyhow::Result;
use clap::Parser;
use svelte_add_jest::SvelteJestAdder;

#[derive(Parser, Debug)]
#[command(name = "svelte-add-jest")]
#[command(about = "Add Jest, Testing Library and optional TypeScript support to a Svelte project")]
#[command(version)]
pub struct Args {
    #[command(flatten)]
    pub adder: AdderArgs,
}

fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let adder = SvelteJestAdder;
    let (args, flags) = adder_core::cli::parse::<Args, _>(&adder);

    let result = adder_core::run(&adder, RunArgs::new(args.adder, flags));

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
