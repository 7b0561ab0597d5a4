//! Variation management.

use hulara_client::woo::types::{NewVariation, VariationAttribute};
use hulara_core::ProductId;

use super::CliError;

fn parse_selection(raw: &str) -> Result<VariationAttribute, CliError> {
    let Some((name, option)) = raw.split_once('=') else {
        return Err(CliError::Invalid(format!(
            "Attribute '{raw}' must be of the form Name=Option"
        )));
    };
    let (name, option) = (name.trim(), option.trim());
    if name.is_empty() || option.is_empty() {
        return Err(CliError::Invalid(format!(
            "Attribute '{raw}' must be of the form Name=Option"
        )));
    }
    Ok(VariationAttribute {
        name: name.to_string(),
        option: option.to_string(),
    })
}

/// Add a variation under a product.
pub async fn add(
    product_id: ProductId,
    sku: &str,
    regular_price: &str,
    sale_price: &str,
    stock: i64,
    attributes: &[String],
) -> Result<(), CliError> {
    let attributes = attributes
        .iter()
        .map(|raw| parse_selection(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let payload = NewVariation {
        sku: sku.to_string(),
        regular_price: regular_price.to_string(),
        sale_price: sale_price.to_string(),
        stock_quantity: stock,
        manage_stock: true,
        attributes,
        image: None,
    };

    let session = super::session().await?;
    let report = super::products::commands(&session)
        .add_variation(product_id, &payload)
        .await;
    super::finish(&report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selection() {
        let selection = parse_selection("Size=M").expect("selection");
        assert_eq!(selection.name, "Size");
        assert_eq!(selection.option, "M");

        let trimmed = parse_selection(" Color = Navy Blue ").expect("selection");
        assert_eq!(trimmed.name, "Color");
        assert_eq!(trimmed.option, "Navy Blue");

        assert!(parse_selection("Size").is_err());
        assert!(parse_selection("=M").is_err());
    }
}
