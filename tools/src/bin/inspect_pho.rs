use std::fs;
use std::path::PathBuf;

use clap::{Arg, Command};
use hime::lexicon::PhoLexicon;
use miette::{IntoDiagnostic, Result, WrapErr};

fn main() -> Result<()> {
    let m = Command::new("inspect-pho")
        .about("Prints summary statistics for a pho.tab2 phonetic lexicon file.")
        .arg(Arg::new("file").required(true))
        .arg(
            Arg::new("key")
                .short('k')
                .long("key")
                .takes_value(true)
                .help("Prints the candidates stored under one packed phonetic key"),
        )
        .arg_required_else_help(true)
        .get_matches();

    let path: PathBuf = m.value_of_t_or_exit("file");
    let bytes = fs::read(&path)
        .into_diagnostic()
        .wrap_err_with(|| format!("reading {}", path.display()))?;
    let lexicon = PhoLexicon::parse(&bytes, &path)
        .map_err(|e| miette::miette!("{e}"))
        .wrap_err("parsing pho.tab2")?;

    println!("{} distinct keys, {} items", lexicon.key_count(), lexicon.item_count());

    if let Some(key) = m.value_of("key") {
        let key: u16 = key.parse().into_diagnostic().wrap_err("parsing --key")?;
        let items = lexicon.lookup(key);
        if items.is_empty() {
            println!("no candidates for key {key}");
        } else {
            for item in items {
                println!("{}\t{}", item.text, item.count);
            }
        }
    }

    Ok(())
}
