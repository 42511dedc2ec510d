use glossa_types::{OcrToken, Point};

/// Text of the token whose centroid is closest to the cursor
pub fn select_nearest(cursor_x: f32, cursor_y: f32, tokens: &[OcrToken]) -> Option<&str> {
    nearest_token(Point::new(cursor_x, cursor_y), tokens).map(|token| token.text.as_str())
}

/// First token at the minimum centroid distance; tokens are scanned in order
pub fn nearest_token(cursor: Point, tokens: &[OcrToken]) -> Option<&OcrToken> {
    let mut nearest: Option<(&OcrToken, f32)> = None;

    for token in tokens {
        let distance = cursor.distance(token.quad.centroid());
        if !distance.is_finite() {
            continue;
        }
        match nearest {
            Some((_, best)) if distance >= best => {}
            _ => nearest = Some((token, distance)),
        }
    }

    nearest.map(|(token, _)| token)
}

#[cfg(test)]
mod tests {
    use glossa_types::Quad;

    use super::*;

    fn token_at(cx: f32, cy: f32, text: &str) -> OcrToken {
        OcrToken {
            quad: Quad::from_rect(cx - 5.0, cy - 5.0, 10.0, 10.0),
            text: text.to_string(),
            confidence: 0.9,
        }
    }

    #[test]
    fn test_picks_closest_centroid() {
        let tokens = vec![token_at(0.0, 0.0, "origin"), token_at(10.0, 10.0, "far")];
        assert_eq!(select_nearest(1.0, 1.0, &tokens), Some("origin"));
        assert_eq!(select_nearest(9.0, 8.0, &tokens), Some("far"));
    }

    #[test]
    fn test_empty_tokens() {
        assert_eq!(select_nearest(0.0, 0.0, &[]), None);
    }

    #[test]
    fn test_first_token_wins_ties() {
        let tokens = vec![
            token_at(-10.0, 0.0, "left"),
            token_at(10.0, 0.0, "right"),
            token_at(0.0, 10.0, "below"),
        ];
        assert_eq!(select_nearest(0.0, 0.0, &tokens), Some("left"));
    }

    #[test]
    fn test_skips_degenerate_geometry() {
        let mut broken = token_at(0.0, 0.0, "nan");
        broken.quad.0[0].x = f32::NAN;
        let tokens = vec![broken, token_at(50.0, 0.0, "ok")];
        assert_eq!(select_nearest(0.0, 0.0, &tokens), Some("ok"));
    }
}
