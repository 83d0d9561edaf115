use serde::{Deserialize, Serialize};

use crate::foundation::error::{StempelError, StempelResult};

/// Texts for a plain stamp.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StampRequest {
    /// Text along the top arc.
    #[serde(alias = "topText")]
    pub top_text: String,
    /// Text along the bottom arc.
    #[serde(alias = "bottomText")]
    pub bottom_text: String,
}

/// Payload and texts for a QR watermark.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatermarkRequest {
    /// String encoded into the QR code.
    #[serde(alias = "qrPayload", alias = "stampText")]
    pub qr_payload: String,
    /// Text along the top arc.
    #[serde(alias = "topText")]
    pub top_text: String,
    /// Text along the bottom arc.
    #[serde(alias = "bottomText")]
    pub bottom_text: String,
}

/// Issuance details of an official letter.
///
/// Expands into a [`WatermarkRequest`] whose QR carries the issuance sentence and whose arcs carry
/// the upper-cased issuing level and region.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStampRequest {
    /// Letter number, e.g. `001/PP-LIM/X/2026`.
    #[serde(alias = "nomorSurat")]
    pub letter_number: String,
    /// Issuing board level, e.g. `Pengurus Pusat`.
    #[serde(alias = "tingkatKepengurusan")]
    pub level: String,
    /// Issuing board region, e.g. `Jakarta`.
    #[serde(alias = "daerahKepengurusan")]
    pub region: String,
    /// Issue date as `YYYY-MM-DD`.
    #[serde(alias = "tanggal")]
    pub issued_on: String,
}

impl DocumentStampRequest {
    /// The issuance sentence encoded into the QR code.
    pub fn payload(&self) -> StempelResult<String> {
        let date = format_indonesian_date(&self.issued_on)?;
        Ok(format!(
            "Surat nomor {} resmi diterbitkan oleh {} Lembaga Ittihadul Muballighin {} pada {date}",
            self.letter_number, self.level, self.region
        ))
    }

    /// Expand into the watermark it stands for.
    pub fn to_watermark_request(&self) -> StempelResult<WatermarkRequest> {
        Ok(WatermarkRequest {
            qr_payload: self.payload()?,
            top_text: self.level.to_uppercase(),
            bottom_text: self.region.to_uppercase(),
        })
    }
}

const MONTHS_ID: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Format an ISO `YYYY-MM-DD` date the Indonesian long way: `2026-10-08` becomes `8 Oktober 2026`.
pub fn format_indonesian_date(iso: &str) -> StempelResult<String> {
    let invalid = || StempelError::validation(format!("expected a YYYY-MM-DD date, got '{iso}'"));

    let mut parts = iso.trim().splitn(3, '-');
    let (Some(y), Some(m), Some(d)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };
    if y.len() != 4 || m.len() != 2 || d.len() != 2 {
        return Err(invalid());
    }
    let year: u32 = y.parse().map_err(|_| invalid())?;
    let month: u32 = m.parse().map_err(|_| invalid())?;
    let day: u32 = d.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
        return Err(invalid());
    }

    Ok(format!("{day} {} {year}", MONTHS_ID[(month - 1) as usize]))
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        2 if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}
