//! 金额格式化
//!
//! 纯函数，按币种参数化，等价于浏览器 `Intl.NumberFormat(locale, { style: "currency" })`
//! 在常见币种上的输出。

/// 币种
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Currency {
    pub code: String,
    pub symbol: String,
    pub decimals: usize,
}

impl Currency {
    /// 肯尼亚先令
    pub fn kes() -> Self {
        Self::from_code("KES")
    }

    /// 按 ISO 4217 代码构造，未知代码用代码本身作为符号
    pub fn from_code(code: &str) -> Self {
        let code = code.trim().to_ascii_uppercase();
        let (symbol, decimals) = match code.as_str() {
            "KES" => ("Ksh", 2),
            "USD" => ("$", 2),
            "EUR" => ("€", 2),
            "GBP" => ("£", 2),
            "UGX" => ("USh", 0),
            "TZS" => ("TSh", 2),
            _ => (code.as_str(), 2),
        };
        Self {
            symbol: symbol.to_string(),
            decimals,
            code,
        }
    }

    // 字母符号与数字之间留空格（"Ksh 10.00"），符号字符直接相连（"$10.00"）
    fn separator(&self) -> &'static str {
        if self.symbol.chars().all(char::is_alphabetic) {
            " "
        } else {
            ""
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::kes()
    }
}

/// 千位分组
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// 格式化价格，非数值显示为 `<符号> 0`
pub fn format_price(amount: f64, currency: &Currency) -> String {
    let sep = currency.separator();
    if !amount.is_finite() {
        return format!("{}{}0", currency.symbol, sep);
    }

    let fixed = format!("{:.*}", currency.decimals, amount.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut number = group_thousands(int_part);
    if let Some(frac) = frac_part {
        number.push('.');
        number.push_str(frac);
    }

    let sign = if amount < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    format!("{}{}{}{}", sign, currency.symbol, sep, number)
}

/// 不带符号的简短金额，整数不显示小数位
pub fn format_amount(amount: f64) -> String {
    if !amount.is_finite() {
        return "0".to_string();
    }
    if amount.fract() == 0.0 {
        format!("{}", amount as i64)
    } else {
        format!("{:.2}", amount)
    }
}
