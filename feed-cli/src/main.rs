use clap::{Parser, Subcommand};
use feed_client::{FeedClient, FeedClientHttp, Post};

#[derive(Parser, Debug)]
#[command(about = "Talk to the feed server")]
struct Cli {
    #[arg(short, long, env = "FEED_SERVER", default_value = "http://127.0.0.1:8080")]
    server: String,

    /// Sent as the X-User identity header.
    #[arg(short, long, env = "FEED_USER")]
    user: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Add {
        #[arg(long)]
        text: String,
    },
    Delete {
        id: i64,
    },
    Feed {
        /// Include deleted posts.
        #[arg(long)]
        all: bool,
    },
    AuthUrl,
    Auth {
        #[arg(long)]
        code: String,
    },
}

fn visible(posts: Vec<Post>, all: bool) -> Vec<Post> {
    if all {
        posts
    } else {
        posts.into_iter().filter(|p| !p.deleted).collect()
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    let mut client = FeedClientHttp::connect(&args.server)?;
    if let Some(user) = args.user {
        client = client.with_user(user);
    }

    match args.command {
        Command::Add { text } => {
            let post = client.add_post(text).await?;
            println!("Post created! ID: {}", post.id);
        }
        Command::Delete { id } => {
            let post = client.delete_post(id).await?;
            println!("Post deleted: {}", post);
        }
        Command::Feed { all } => {
            let posts = visible(client.get_feed().await?, all);
            println!("Posts ({})", posts.len());
            for post in posts {
                println!("- {}", post);
            }
        }
        Command::AuthUrl => {
            println!("{}", client.vk_auth_url().await?);
        }
        Command::Auth { code } => {
            let session = client.vk_auth(code).await?;
            println!("user_id: {}", session.user_id);
            println!("token: {}", session.token);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: i64, deleted: bool) -> Post {
        Post {
            id,
            author_id: "1".into(),
            text: format!("post {id}"),
            created_at: "2025-01-01T00:00:00Z".parse().unwrap(),
            deleted,
        }
    }

    #[test]
    fn feed_hides_deleted_posts_by_default() {
        let posts = vec![post(2, false), post(1, true)];
        let shown: Vec<i64> = visible(posts.clone(), false).iter().map(|p| p.id).collect();
        assert_eq!(shown, vec![2]);
        assert_eq!(visible(posts, true).len(), 2);
    }

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["feed-cli", "--user", "alice", "add", "--text", "hi"]).unwrap();
        assert_eq!(cli.user.as_deref(), Some("alice"));
        assert!(matches!(cli.command, Command::Add { ref text } if text == "hi"));

        let cli = Cli::try_parse_from(["feed-cli", "delete", "7"]).unwrap();
        assert!(matches!(cli.command, Command::Delete { id: 7 }));

        let cli = Cli::try_parse_from(["feed-cli", "feed", "--all"]).unwrap();
        assert!(matches!(cli.command, Command::Feed { all: true }));
    }
}
