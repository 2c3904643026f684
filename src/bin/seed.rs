//! Seeds the sample data set: two users, two blogs and three comments.
//! With `--random N`: N users, 2N blogs and 5N comments of generated text.

use blog_api::models::{Blog, Tag, User};
use blog_api::store::{NewBlog, NewComment, NewUser};
use blog_api::{ensure_database_exists, ensure_schema, AppConfig, PgStore, Store, StoreError};
use clap::Parser;
use fake::faker::internet::en::Username;
use fake::faker::lorem::en::{Paragraphs, Sentence, Sentences};
use fake::Fake;
use rand::seq::SliceRandom;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Seed the blog database with sample data.")]
struct Cli {
    /// Insert N random users, 2N blogs and 5N comments instead of the fixed sample set.
    #[arg(long, value_name = "N")]
    random: Option<usize>,
}

const LONG_CONTENT: &str = "\
Lorem ipsum dolor sit amet, consectetur adipiscing elit. Phasellus nec iaculis mauris.
Curabitur tempus mollis sapien, ac fermentum nibh varius nec. Ut ac orci vestibulum,
luctus lorem a, efficitur arcu. In hac habitasse platea dictumst. Vivamus venenatis
egestas ligula, et auctor metus vehicula id. Maecenas tincidunt, velit sit amet auctor
egestas, sem ligula blandit arcu, nec lacinia elit nisl eu justo. Curabitur fermentum
sapien eget ultricies tempus. Aenean gravida risus sit amet ligula aliquet pharetra.

Pellentesque volutpat, metus non ullamcorper fringilla, erat ex commodo urna, sed facilisis
nisl velit nec turpis. Nulla id enim sem. In volutpat libero ut diam sollicitudin, id congue
ante tristique. Sed at facilisis enim. Aliquam erat volutpat. Sed viverra eu nisl a convallis.
Praesent id risus in purus ultricies consectetur ac ac ligula. Pellentesque sit amet metus ut
sapien malesuada aliquam et sed neque. Donec laoreet quam in nisl fermentum scelerisque.

Fusce convallis consequat quam in dignissim. Duis vehicula efficitur dolor, et laoreet neque
efficitur vel. Vivamus feugiat dolor magna, non dictum lorem facilisis in. Sed convallis erat
nisl, id sagittis turpis scelerisque sit amet. Etiam vel risus consequat, aliquet ipsum in,
vestibulum est. Nulla facilisi. Curabitur sit amet odio sed justo aliquet venenatis ac id nisi.
";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = AppConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("blog_api=info,blog_seed=info")),
        )
        .init();

    ensure_database_exists(&config.database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database_url)
        .await?;
    ensure_schema(&pool).await?;
    let store = PgStore::new(pool);

    match cli.random {
        Some(n) => seed_random(&store, n).await?,
        None => seed_sample(&store).await?,
    }

    store.close().await;
    Ok(())
}

async fn seed_sample(store: &PgStore) -> Result<(), StoreError> {
    let john = store
        .create_user(NewUser {
            username: "john_doe".into(),
        })
        .await?;
    let jane = store
        .create_user(NewUser {
            username: "jane_doe".into(),
        })
        .await?;

    let first = store
        .create_blog(NewBlog {
            title: "First Blog Post".into(),
            content: "This is the content of the first blog post.".into(),
            community: Tag::Others,
            user_id: john.id,
        })
        .await?;
    let second = store
        .create_blog(NewBlog {
            title: "Second Blog Post".into(),
            content: LONG_CONTENT.into(),
            community: Tag::History,
            user_id: jane.id,
        })
        .await?;

    for (content, user_id, blog_id) in [
        ("Great post!", john.id, first.id),
        ("Very informative.", jane.id, first.id),
        ("I learned a lot from this.", john.id, second.id),
    ] {
        store
            .create_comment(NewComment {
                content: content.into(),
                user_id,
                blog_id,
            })
            .await?;
    }

    tracing::info!("sample data has been seeded");
    Ok(())
}

fn random_blog(users: &[User]) -> Option<NewBlog> {
    let mut rng = rand::thread_rng();
    let paragraphs: Vec<String> = Paragraphs(3..50).fake();
    Some(NewBlog {
        title: Sentence(3..8).fake(),
        content: paragraphs.join("\n\n"),
        community: *Tag::ALL.choose(&mut rng)?,
        user_id: users.choose(&mut rng)?.id,
    })
}

fn random_comment(users: &[User], blogs: &[Blog]) -> Option<NewComment> {
    let mut rng = rand::thread_rng();
    let sentences: Vec<String> = Sentences(1..4).fake();
    Some(NewComment {
        content: sentences.join(" "),
        user_id: users.choose(&mut rng)?.id,
        blog_id: blogs.choose(&mut rng)?.id,
    })
}

async fn seed_random(store: &PgStore, n: usize) -> Result<(), StoreError> {
    let mut users = Vec::with_capacity(n);
    for i in 0..n {
        // generated names repeat; the suffix keeps them unique
        let name: String = Username().fake();
        let user = store
            .create_user(NewUser {
                username: format!("{}_{}", name, i),
            })
            .await?;
        users.push(user);
    }

    let mut blogs = Vec::with_capacity(n * 2);
    for _ in 0..n * 2 {
        let Some(input) = random_blog(&users) else { break };
        blogs.push(store.create_blog(input).await?);
    }

    let mut comments = 0;
    for _ in 0..n * 5 {
        let Some(input) = random_comment(&users, &blogs) else { break };
        store.create_comment(input).await?;
        comments += 1;
    }

    tracing::info!(users = users.len(), blogs = blogs.len(), comments, "random data has been seeded");
    Ok(())
}
