// src/services/pix.rs
//
// Pix "copia e cola" estático (BR Code, formato EMV-MPM do Banco Central).

use rust_decimal::Decimal;

use crate::common::{error::AppError, text::fold_accents};

const GUI: &str = "br.gov.bcb.pix";
const MAX_NAME: usize = 25;
const MAX_CITY: usize = 15;
const MAX_TXID: usize = 25;

#[derive(Debug, Clone)]
pub struct PixCharge<'a> {
    pub key: &'a str,
    pub merchant_name: &'a str,
    pub merchant_city: &'a str,
    pub amount: Option<Decimal>,
    // Identificador da transação; "***" quando ausente
    pub txid: Option<&'a str>,
}

// ID (2 dígitos) + tamanho (2 dígitos) + valor
fn field(id: &str, value: &str) -> String {
    format!("{}{:02}{}", id, value.len(), value)
}

fn sanitize(value: &str, max: usize) -> String {
    fold_accents(value)
        .chars()
        .filter(|c| c.is_ascii() && !c.is_ascii_control())
        .take(max)
        .collect::<String>()
        .trim()
        .to_string()
}

/// CRC16-CCITT (polinômio 0x1021, valor inicial 0xFFFF).
pub fn crc16(payload: &str) -> u16 {
    let mut crc: u16 = 0xFFFF;
    for byte in payload.bytes() {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 { (crc << 1) ^ 0x1021 } else { crc << 1 };
        }
    }
    crc
}

/// Monta o payload completo, já com o CRC no campo 63.
pub fn build_payload(charge: &PixCharge<'_>) -> Result<String, AppError> {
    let key = charge.key.trim();
    if key.is_empty() || key.len() > 77 {
        return Err(AppError::InvalidInput("Chave Pix inválida.".into()));
    }

    let name = sanitize(charge.merchant_name, MAX_NAME);
    let city = sanitize(charge.merchant_city, MAX_CITY);
    if name.is_empty() || city.is_empty() {
        return Err(AppError::InvalidInput("Nome e cidade do recebedor são obrigatórios para o Pix.".into()));
    }

    let txid: String = charge
        .txid
        .map(|t| t.chars().filter(|c| c.is_ascii_alphanumeric()).take(MAX_TXID).collect())
        .filter(|t: &String| !t.is_empty())
        .unwrap_or_else(|| "***".to_string());

    let mut payload = String::new();
    payload.push_str(&field("00", "01"));
    payload.push_str(&field("26", &format!("{}{}", field("00", GUI), field("01", key))));
    payload.push_str(&field("52", "0000"));
    payload.push_str(&field("53", "986"));

    if let Some(amount) = charge.amount {
        if amount <= Decimal::ZERO {
            return Err(AppError::InvalidInput("O valor do Pix deve ser positivo.".into()));
        }
        payload.push_str(&field("54", &format!("{:.2}", amount.round_dp(2))));
    }

    payload.push_str(&field("58", "BR"));
    payload.push_str(&field("59", &name));
    payload.push_str(&field("60", &city));
    payload.push_str(&field("62", &field("05", &txid)));

    payload.push_str("6304");
    let crc = crc16(&payload);
    payload.push_str(&format!("{:04X}", crc));

    Ok(payload)
}

/// Renderiza o payload como QR Code em SVG.
pub fn payload_svg(payload: &str) -> Result<String, AppError> {
    let code = qrcode::QrCode::new(payload.as_bytes())
        .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
    Ok(code
        .render::<qrcode::render::svg::Color>()
        .min_dimensions(240, 240)
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_central_bank_reference_payload() {
        let payload = build_payload(&PixCharge {
            key: "123e4567-e12b-12d1-a456-426655440000",
            merchant_name: "Fulano de Tal",
            merchant_city: "BRASILIA",
            amount: None,
            txid: None,
        })
        .unwrap();

        assert_eq!(
            payload,
            "00020126580014br.gov.bcb.pix0136123e4567-e12b-12d1-a456-4266554400005204000053039865802BR5913Fulano de Tal6008BRASILIA62070503***63041D3D"
        );
    }

    #[test]
    fn amount_and_txid_are_encoded() {
        let payload = build_payload(&PixCharge {
            key: "contato@pizzaria.com.br",
            merchant_name: "Pizzaria do João",
            merchant_city: "São Paulo",
            amount: Some(Decimal::new(10480, 2)),
            txid: Some("PEDIDO-42"),
        })
        .unwrap();

        assert!(payload.contains("5406104.80"));
        assert!(payload.contains("5916Pizzaria do Joao"));
        assert!(payload.contains("6009Sao Paulo"));
        assert!(payload.contains("62120508PEDIDO42"));

        // O CRC final confere com o resto do payload
        let (body, crc) = payload.split_at(payload.len() - 4);
        assert_eq!(format!("{:04X}", crc16(body)), crc);
    }

    #[test]
    fn long_names_are_truncated() {
        let payload = build_payload(&PixCharge {
            key: "11999998888",
            merchant_name: "Restaurante e Pizzaria Sabor da Fazenda Ltda",
            merchant_city: "Santo Antonio do Descoberto",
            amount: None,
            txid: None,
        })
        .unwrap();

        assert!(payload.contains("5925Restaurante e Pizzaria S"));
        assert!(payload.contains("6015Santo Antonio d"));
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        let no_key = PixCharge {
            key: "  ",
            merchant_name: "Loja",
            merchant_city: "Recife",
            amount: None,
            txid: None,
        };
        assert!(matches!(build_payload(&no_key), Err(AppError::InvalidInput(_))));

        let zero = PixCharge { key: "chave", amount: Some(Decimal::ZERO), ..no_key };
        assert!(matches!(build_payload(&zero), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn svg_is_rendered() {
        let svg = payload_svg("00020126").unwrap();
        assert!(svg.contains("<svg"));
    }
}
