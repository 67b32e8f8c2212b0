//! Price pills for timeline sub-points
//!
//! Sub-points are free text such as `"Metro day pass € 6.4 at the kiosk"`. The
//! first euro amount is pulled out so it can be shown as a separate pill.

/// A sub-point split into its price and the remaining text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedText {
    /// Normalised price with whitespace removed (`"€6.4"`)
    pub price: Option<String>,
    pub text: String,
}

/// Split the first `€<amount>` out of `input`.
///
/// The amount may be separated from the sign by a single whitespace character
/// and may carry a decimal part. The remaining text has whitespace runs collapsed and is
/// trimmed. Input without a price is returned unchanged.
pub fn split_price(input: &str) -> PricedText {
    let Some((start, end)) = find_price(input) else {
        return PricedText {
            price: None,
            text: input.to_string(),
        };
    };

    let price: String = input[start..end].chars().filter(|c| !c.is_whitespace()).collect();
    let rest = format!("{}{}", &input[..start], &input[end..]);

    PricedText {
        price: Some(price),
        text: collapse_whitespace(&rest),
    }
}

/// Byte range of the first euro amount
fn find_price(input: &str) -> Option<(usize, usize)> {
    for (start, _) in input.match_indices('€') {
        let after_sign = start + '€'.len_utf8();
        let digits_at = match input[after_sign..].chars().next() {
            Some(c) if c.is_whitespace() => after_sign + c.len_utf8(),
            _ => after_sign,
        };

        let int_len = count_digits(&input[digits_at..]);
        if int_len == 0 {
            continue;
        }
        let mut end = digits_at + int_len;

        if input[end..].starts_with('.') {
            let frac_len = count_digits(&input[end + 1..]);
            if frac_len > 0 {
                end += 1 + frac_len;
            }
        }
        return Some((start, end));
    }
    None
}

fn count_digits(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

/// Collapse runs of two or more whitespace characters into a single space
fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut run = 0usize;
    let mut pending = None;

    for c in s.chars() {
        if c.is_whitespace() {
            run += 1;
            pending = Some(if run == 1 { c } else { ' ' });
            continue;
        }
        if let Some(ws) = pending.take() {
            out.push(ws);
        }
        run = 0;
        out.push(c);
    }

    out.trim().to_string()
}
