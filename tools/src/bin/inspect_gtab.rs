use std::fs;
use std::path::PathBuf;

use clap::{Arg, Command};
use hime::lexicon::GtabTable;
use miette::{IntoDiagnostic, Result, WrapErr};

fn main() -> Result<()> {
    let m = Command::new("inspect-gtab")
        .about("Prints header fields and entry counts for a GTAB table file.")
        .arg(Arg::new("file").required(true))
        .arg(
            Arg::new("prefix")
                .short('p')
                .long("prefix")
                .takes_value(true)
                .help("Comma-separated 1-based symbol indices; lists candidates with this prefix"),
        )
        .arg_required_else_help(true)
        .get_matches();

    let path: PathBuf = m.value_of_t_or_exit("file");
    let bytes = fs::read(&path)
        .into_diagnostic()
        .wrap_err_with(|| format!("reading {}", path.display()))?;
    let table = GtabTable::parse(&bytes, &path)
        .map_err(|e| miette::miette!("{e}"))
        .wrap_err("parsing GTAB table")?;

    println!("name: {}", table.cname);
    println!("key_count: {}", table.key_count);
    println!("max_press: {}", table.max_press);
    println!("keybits: {}", table.keybits);
    println!("word_width: {}", table.word_width);
    println!("sorted: {}", table.sorted);
    println!("items: {}", table.item_count());
    println!(
        "selection keys: {}",
        table.selkey.iter().collect::<String>()
    );

    if let Some(prefix) = m.value_of("prefix") {
        let keys = prefix
            .split(',')
            .map(|s| s.trim().parse::<u8>())
            .collect::<Result<Vec<_>, _>>()
            .into_diagnostic()
            .wrap_err("parsing --prefix")?;
        let matches = table.prefix(&keys);
        if matches.is_empty() {
            println!("no candidates for prefix {prefix}");
        } else {
            for item in matches {
                println!("{:#x}\t{}", item.packed_key, item.text);
            }
        }
    }

    Ok(())
}
