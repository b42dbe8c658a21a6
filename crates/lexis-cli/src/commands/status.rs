//! Status command - show dictionary statistics.

use crate::app::App;

/// Run the status command.
pub fn run(app: &App) -> anyhow::Result<()> {
    let stats = app.dictionary.stats()?;

    println!("Lexis Dictionary Status");
    println!("=======================");
    println!();
    println!("  Store:    {}", stats.path.display());

    if !app.dictionary.store().exists() {
        println!();
        println!("The dictionary is empty. Add a word with 'lexis add'.");
        return Ok(());
    }

    println!("  Records:  {}", stats.records);
    println!("  Words:    {}", stats.words);
    println!(
        "  Backup:   {}",
        if stats.has_backup {
            app.dictionary.store().backup_path().display().to_string()
        } else {
            "none".to_string()
        }
    );

    println!();
    println!("Parts of speech: {}", app.dictionary.parts_of_speech().join(", "));

    Ok(())
}
