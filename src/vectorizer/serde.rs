use ::serde::{de::DeserializeOwned, Serialize};
use num::Num;

use crate::error::Result;
use crate::vectorizer::tfidf::TFIDFEngine;
use crate::vectorizer::TFIDFModel;

/// フィット済みモデルのシリアライズ
/// モデルは参照を持たないため、そのままCBORバイト列に変換できます。
impl<N, E> TFIDFModel<N, E>
where
    N: Num + Copy + Serialize + DeserializeOwned,
    E: TFIDFEngine<N>,
{
    /// モデルをCBORバイト列にシリアライズします
    pub fn to_cbor(&self) -> Result<Vec<u8>> {
        Ok(serde_cbor::to_vec(self)?)
    }

    /// CBORバイト列からモデルを復元します
    pub fn from_cbor(bytes: &[u8]) -> Result<Self> {
        Ok(serde_cbor::from_slice(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use crate::vectorizer::corpus::Corpus;
    use crate::vectorizer::tokenizer::Tokenizer;
    use crate::vectorizer::{TFIDFModel, TFIDFVectorizer};

    #[test]
    fn cbor_round_trip_preserves_the_model() {
        let corpus: Corpus = ["rust is fast", "rust is safe", "python is slow"]
            .into_iter()
            .collect();
        let vectorizer: TFIDFVectorizer =
            TFIDFVectorizer::with_tokenizer(Tokenizer::new().no_stop_words());
        let model = vectorizer.fit(&corpus).unwrap();

        let bytes = model.to_cbor().unwrap();
        let restored: TFIDFModel = TFIDFModel::from_cbor(&bytes).unwrap();

        let terms_a: Vec<&str> = model.vocab().terms().collect();
        let terms_b: Vec<&str> = restored.vocab().terms().collect();
        assert_eq!(terms_a, terms_b);
        assert_eq!(model.idf(), restored.idf());
        assert_eq!(model.rows(), restored.rows());
    }

    #[test]
    fn from_cbor_rejects_garbage() {
        let result = TFIDFModel::<f64>::from_cbor(&[0xff, 0x00, 0x13]);
        assert!(result.is_err());
    }
}
