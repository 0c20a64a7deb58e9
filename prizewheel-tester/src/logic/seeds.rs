use anyhow::{Context, Result, bail};

/// Parse CLI seed tokens. Accepts decimal or `0x`-prefixed hex.
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<u64>> {
    let mut seeds = Vec::with_capacity(tokens.len());
    for token in tokens {
        let seed = if let Some(hex) = token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
        {
            u64::from_str_radix(hex, 16).with_context(|| format!("invalid hex seed {token}"))?
        } else {
            token
                .parse::<u64>()
                .with_context(|| format!("invalid seed {token}"))?
        };
        if !seeds.contains(&seed) {
            seeds.push(seed);
        }
    }
    if seeds.is_empty() {
        bail!("at least one seed is required");
    }
    Ok(seeds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn parses_decimal_and_hex_and_dedupes() {
        let seeds = resolve_seed_inputs(&tokens(&["1337", "0x539", "7"])).unwrap();
        assert_eq!(seeds, vec![1337, 7]);
    }

    #[test]
    fn rejects_garbage_and_empty_input() {
        assert!(resolve_seed_inputs(&tokens(&["abc"])).is_err());
        assert!(resolve_seed_inputs(&tokens(&["0xZZ"])).is_err());
        assert!(resolve_seed_inputs(&[]).is_err());
    }
}
