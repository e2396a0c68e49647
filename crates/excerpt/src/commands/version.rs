pub fn run() -> anyhow::Result<()> {
    println!("excerpt {}", env!("CARGO_PKG_VERSION"));
    println!("Persona-driven section ranking for document batches");
    Ok(())
}
