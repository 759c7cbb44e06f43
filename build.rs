use entities::ENTITIES;
use std::collections::HashSet;
use std::io::Write;
use std::{env, path::PathBuf};

fn main() {
    let out_dir: PathBuf = env::var("OUT_DIR").unwrap().parse().unwrap();

    // entity::lookup is handed just the inner entity name, like "amp" for
    // "&amp;"; we only match those with a trailing ";", since wikitext
    // requires the semicolon even where HTML5 would forgive its absence.
    //
    // entities::ENTITIES includes many both with and without a trailing ";".
    // Exclude those without, and key the map by the bare name, without the
    // leading "&" or trailing ";".
    let mut seen = HashSet::new();
    let mut map = phf_codegen::Map::new();
    for e in ENTITIES
        .iter()
        .filter(|e| e.entity.starts_with('&') && e.entity.ends_with(';'))
    {
        let name = &e.entity[1..e.entity.len() - 1];
        if seen.insert(name) {
            map.entry(name, &format!("{:?}", e.characters));
        }
    }

    let out = std::fs::File::create(out_dir.join("entitydata.rs")).unwrap();
    let mut bw = std::io::BufWriter::new(out);
    writeln!(bw, "mod entitydata {{").unwrap();
    writeln!(
        bw,
        "    pub static ENTITIES: phf::Map<&'static str, &'static str> = {};",
        map.build()
    )
    .unwrap();
    writeln!(bw, "}}").unwrap();
}
