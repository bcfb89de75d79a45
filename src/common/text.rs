// src/common/text.rs

/// Gera um slug de URL ("Pizzaria do João" -> "pizzaria-do-joao").
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut last_was_dash = true;

    for ch in input.chars().map(fold_accent) {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash {
            slug.push('-');
            last_was_dash = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

pub fn fold_accents(input: &str) -> String {
    input.chars().map(fold_accent).collect()
}

/// Um slug válido: minúsculas, dígitos e hífens simples, sem hífen nas pontas.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= 63
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Remove acentos do alfabeto português ("ç" -> "c", "ã" -> "a").
pub fn fold_accent(ch: char) -> char {
    match ch {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'ç' => 'c',
        'Ç' => 'C',
        'ñ' => 'n',
        'Ñ' => 'N',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_folds_accents_and_collapses_separators() {
        assert_eq!(slugify("Pizzaria do João"), "pizzaria-do-joao");
        assert_eq!(slugify("  Açaí & Cia.  "), "acai-cia");
        assert_eq!(slugify("Bar--Restaurante 24h"), "bar-restaurante-24h");
    }

    #[test]
    fn slug_validation() {
        assert!(is_valid_slug("hamburgueria-central"));
        assert!(is_valid_slug("loja24"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("-loja"));
        assert!(!is_valid_slug("loja--centro"));
        assert!(!is_valid_slug("Loja"));
    }

    #[test]
    fn folding_keeps_case() {
        assert_eq!(fold_accents("AÇAÍ da Conceição"), "ACAI da Conceicao");
    }
}
