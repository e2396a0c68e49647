use excerpt_core::KeywordConfig;
use serde_json::json;

pub fn run(text: &str, top: usize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&describe(text, top))?);
    Ok(())
}

fn describe(text: &str, top: usize) -> serde_json::Value {
    let signature = KeywordConfig::new().extractor().extract(text);
    let terms: Vec<_> = signature
        .top(top)
        .into_iter()
        .map(|(term, weight)| {
            json!({
                "term": term,
                "weight": weight,
                "variants": signature.variants(term),
            })
        })
        .collect();

    json!({
        "tokens": signature.token_count(),
        "terms": terms,
    })
}
