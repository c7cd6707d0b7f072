use num::Num;

use crate::utils::datastruct::sparse::SpVec;
use crate::vectorizer::term::TermFrequency;
use crate::vectorizer::Vocabulary;

pub trait TFIDFEngine<N>
where
    N: Num + Copy,
{
    /// IDFベクトルを生成するメソッド
    /// # Arguments
    /// * `doc_num` - コーパスの文書数
    /// * `vocab` - 語彙 (文書頻度つき)
    /// # Returns
    /// * `Vec<N>` - IDFベクトル (語彙の列順)
    fn idf_vec(doc_num: usize, vocab: &Vocabulary) -> Vec<N>;

    /// TFベクトルを生成するメソッド
    /// # Arguments
    /// * `freq` - 文書のterm頻度
    /// * `vocab` - 語彙
    /// # Returns
    /// * `SpVec<N>` - TFベクトル (sparse)
    fn tf_vec(freq: &TermFrequency, vocab: &Vocabulary) -> SpVec<N>;
}

/// デフォルトのTF-IDFエンジン
/// `f32`、`f64`の型に対応
///
/// tf(t, d) = count(t in d) / total_token_count(d)
/// idf(t) = ln(N / df(t))
///
/// 全文書に現れるtermはidf = 0、1文書だけに現れるtermはidf = ln(N)。
/// トークンが無い文書のtfは全て0 (ゼロ除算を避ける)。
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl DefaultTFIDFEngine {
    pub fn new() -> Self {
        DefaultTFIDFEngine
    }
}

impl TFIDFEngine<f64> for DefaultTFIDFEngine {
    fn idf_vec(doc_num: usize, vocab: &Vocabulary) -> Vec<f64> {
        let n = doc_num as f64;
        vocab
            .doc_freqs()
            .map(|(_, df)| (n / df as f64).ln())
            .collect()
    }

    fn tf_vec(freq: &TermFrequency, vocab: &Vocabulary) -> SpVec<f64> {
        let total = freq.term_sum();
        let mut tf_vec = SpVec::with_capacity(vocab.len(), freq.unique_term_num());
        if total == 0 {
            // 空文書はゼロベクトル
            return tf_vec;
        }
        for (idx, term) in vocab.terms().enumerate() {
            let count = freq.term_count(term);
            if count > 0 {
                tf_vec.push(idx, count as f64 / total as f64);
            }
        }
        tf_vec
    }
}

impl TFIDFEngine<f32> for DefaultTFIDFEngine {
    fn idf_vec(doc_num: usize, vocab: &Vocabulary) -> Vec<f32> {
        let n = doc_num as f64;
        vocab
            .doc_freqs()
            .map(|(_, df)| (n / df as f64).ln() as f32)
            .collect()
    }

    fn tf_vec(freq: &TermFrequency, vocab: &Vocabulary) -> SpVec<f32> {
        let total = freq.term_sum();
        let mut tf_vec = SpVec::with_capacity(vocab.len(), freq.unique_term_num());
        if total == 0 {
            return tf_vec;
        }
        for (idx, term) in vocab.terms().enumerate() {
            let count = freq.term_count(term);
            if count > 0 {
                tf_vec.push(idx, (count as f64 / total as f64) as f32);
            }
        }
        tf_vec
    }
}
