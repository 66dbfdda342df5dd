//! 編碼折線解碼（精度 1e-5）

use alba_core::{LatLng, ServiceError};

const PRECISION: f64 = 1e5;

/// 解碼路線服務回傳的編碼折線
pub fn decode(encoded: &str) -> Result<Vec<LatLng>, ServiceError> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::new();
    let mut pos = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;

    while pos < bytes.len() {
        lat += next_value(bytes, &mut pos)?;
        lng += next_value(bytes, &mut pos)?;
        points.push(LatLng::new(lat as f64 / PRECISION, lng as f64 / PRECISION));
    }

    Ok(points)
}

/// 讀取一個 zigzag 編碼的 5-bit 分組數值
fn next_value(bytes: &[u8], pos: &mut usize) -> Result<i64, ServiceError> {
    let mut result: i64 = 0;
    let mut shift = 0;

    loop {
        let byte = *bytes
            .get(*pos)
            .ok_or_else(|| ServiceError::MalformedPolyline(format!("位置 {} 資料不完整", *pos)))?;
        if !(63..=126).contains(&byte) {
            return Err(ServiceError::MalformedPolyline(format!("位置 {} 含無效字元", *pos)));
        }
        if shift > 30 {
            return Err(ServiceError::MalformedPolyline(format!("位置 {} 數值過長", *pos)));
        }
        *pos += 1;

        let chunk = i64::from(byte - 63);
        result |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk < 0x20 {
            break;
        }
    }

    Ok(if result & 1 == 1 { !(result >> 1) } else { result >> 1 })
}
