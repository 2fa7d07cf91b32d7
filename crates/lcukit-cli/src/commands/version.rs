//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - LCU, state preparation and Trotter circuit synthesis",
        style("lcukit").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  lcukit-ir           Circuit intermediate representation");
    println!("  lcukit-synth        Synthesis: state prep, SELECT, LCU, Trotter");
    println!("  lcukit-adapter-sim  Statevector simulator");
    println!("  lcukit-cli          Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
