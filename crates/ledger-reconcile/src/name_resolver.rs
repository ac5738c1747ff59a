//! 종목명 퍼지 해석.
//!
//! 원장의 노이즈 섞인 종목명(축약, 접미사, 임의 표기)을 매매일지의
//! 정식 종목명으로 해석합니다. 완전 일치를 먼저 시도하고, 실패하면
//! 토큰 중첩 점수로 가장 가까운 후보를 고릅니다.
//!
//! 토큰 추출과 점수 계산은 순수 함수로 분리되어 개별 단위 테스트가
//! 가능합니다. 해석 실패는 정상적인 결과이며 에러가 아닙니다.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeSet;

/// 부분 일치 점수의 상한. 완전 일치(1.0)와 구분하기 위해 0.8로 제한합니다.
const PARTIAL_MATCH_CAP: Decimal = dec!(0.8);

/// 문자열에서 매칭 토큰을 추출합니다.
///
/// 세 종류의 연속 구간을 토큰으로 봅니다:
/// - 라틴 문자 연속 구간 (대문자로 정규화)
/// - 숫자 연속 구간
/// - 길이 2 이상의 한글 연속 구간
pub fn extract_tokens(text: &str) -> BTreeSet<String> {
    #[derive(PartialEq, Clone, Copy)]
    enum Class {
        Latin,
        Digit,
        Hangul,
        Other,
    }

    fn class_of(c: char) -> Class {
        if c.is_ascii_alphabetic() {
            Class::Latin
        } else if c.is_ascii_digit() {
            Class::Digit
        } else if ('가'..='힣').contains(&c) {
            Class::Hangul
        } else {
            Class::Other
        }
    }

    let mut tokens = BTreeSet::new();
    let mut run = String::new();
    let mut run_class = Class::Other;

    let mut flush = |run: &mut String, class: Class, tokens: &mut BTreeSet<String>| {
        if run.is_empty() {
            return;
        }
        match class {
            Class::Latin => {
                tokens.insert(run.to_uppercase());
            }
            Class::Digit => {
                tokens.insert(run.clone());
            }
            Class::Hangul => {
                if run.chars().count() >= 2 {
                    tokens.insert(run.clone());
                }
            }
            Class::Other => {}
        }
        run.clear();
    };

    for c in text.chars() {
        let class = class_of(c);
        if class != run_class {
            flush(&mut run, run_class, &mut tokens);
            run_class = class;
        }
        if class != Class::Other {
            run.push(c);
        }
    }
    flush(&mut run, run_class, &mut tokens);

    tokens
}

/// 대상 토큰 집합과 후보 토큰 집합의 일치 점수를 계산합니다.
///
/// 대상 토큰마다 후보 토큰 중 최고 점수를 취해 합산하고 대상 토큰
/// 수로 나눕니다. 토큰 점수: 완전 일치 1.0, 한쪽이 다른 쪽의 부분
/// 문자열이면 길이 비율(최대 0.8), 그 외 0.
pub fn match_score(target_tokens: &BTreeSet<String>, candidate_tokens: &BTreeSet<String>) -> Decimal {
    if target_tokens.is_empty() {
        return Decimal::ZERO;
    }

    let mut total_score = Decimal::ZERO;

    for target_token in target_tokens {
        let mut max_token_score = Decimal::ZERO;
        for candidate_token in candidate_tokens {
            let score = if target_token == candidate_token {
                Decimal::ONE
            } else if target_token.contains(candidate_token.as_str())
                || candidate_token.contains(target_token.as_str())
            {
                let shorter = target_token.chars().count().min(candidate_token.chars().count());
                let longer = target_token.chars().count().max(candidate_token.chars().count());
                (Decimal::from(shorter) / Decimal::from(longer)).min(PARTIAL_MATCH_CAP)
            } else {
                Decimal::ZERO
            };
            if score > max_token_score {
                max_token_score = score;
            }
        }
        total_score += max_token_score;
    }

    total_score / Decimal::from(target_tokens.len())
}

/// 종목명을 이름 풀에서 해석합니다.
///
/// 완전 일치가 있으면 즉시 반환하고, 없으면 토큰 점수가 임계값을
/// 넘는 최고 후보를 반환합니다. 동점은 풀 순서상 앞선 후보가
/// 이깁니다 (결정적 동작).
///
/// `None`은 "해석 불가"이며 호출자는 원본 이름을 유지하고 종목코드를
/// 비워 둡니다.
pub fn resolve(target: &str, pool: &[String], threshold: Decimal) -> Option<String> {
    if pool.iter().any(|candidate| candidate == target) {
        return Some(target.to_string());
    }

    let target_tokens = extract_tokens(target);
    if target_tokens.is_empty() {
        return None;
    }

    let mut best: Option<(&String, Decimal)> = None;
    for candidate in pool {
        let score = match_score(&target_tokens, &extract_tokens(candidate));
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((candidate, score));
        }
    }

    match best {
        Some((candidate, score)) if score > threshold => {
            tracing::debug!(target, resolved = %candidate, %score, "종목명 퍼지 해석 성공");
            Some(candidate.clone())
        }
        _ => {
            tracing::debug!(target, "종목명 해석 실패, 원본 이름 유지");
            None
        }
    }
}
