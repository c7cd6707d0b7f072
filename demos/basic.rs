use tf_idf_clusterer::{
    distance_matrix, Agglomerative, Clustering, Corpus, KMeans, Linkage, TFIDFVectorizer,
    Tokenizer, PCA,
};

fn main() -> tf_idf_clusterer::Result<()> {
    // build corpus
    let corpus: Corpus = [
        "Atomic Burger makes a tasty burger",
        "An atomic clock is accurate",
        "Atomic weapons are destructive",
        "The burger joint downtown serves a giant burger",
        "Clock towers keep accurate time",
        "Destructive storms flattened the town",
    ]
    .into_iter()
    .collect();

    // fit the tf-idf model
    let vectorizer: TFIDFVectorizer = TFIDFVectorizer::with_tokenizer(Tokenizer::new());
    let model = vectorizer.fit(&corpus)?;
    println!(
        "fitted {} documents over {} terms",
        model.doc_num(),
        model.vocab_size()
    );

    // pairwise cosine distances
    let dense = model.to_dense();
    let distances = distance_matrix(&dense)?;
    println!("cosine distance d0-d3: {:.4}", distances[0][3]);
    println!("cosine distance d0-d2: {:.4}", distances[0][2]);

    // project to 3 components and cluster
    let (pca, reduced) = PCA::fit_transform(&dense, 3)?;
    println!("explained variance ratios: {:?}", pca.explained_variance_ratio());

    let kmeans_labels = KMeans::new().seed(42).fit_predict(&reduced, 3)?;
    println!("k-means labels:        {:?}", kmeans_labels);

    let agglo_labels = Agglomerative::new(Linkage::Ward).fit_predict(&reduced, 3)?;
    println!("agglomerative labels:  {:?}", agglo_labels);

    Ok(())
}
