//! Start data generation jobs on the catalog server.
//!
//! Jobs run asynchronously on the server; these commands return as soon as
//! the server accepts (or refuses) the job.

use catalog_explorer_core::{CustomVolume, DEFAULT_BRANDS, DEFAULT_CATEGORIES, DEFAULT_PRODUCTS};
use catalog_explorer_storefront::catalog::CatalogClient;
use catalog_explorer_storefront::explorer::generation::{
    self, GenerationControls, GenerationKind, GenerationStatus, StatusTone,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

use super::{CommandError, load_config};

/// Custom volume counts given on the command line; `None` is prompted for.
#[derive(Debug, Clone, Default)]
pub struct VolumeAnswers {
    pub brands: Option<String>,
    pub categories: Option<String>,
    pub products: Option<String>,
}

/// Start the fixed-volume (50k products) job.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the server refuses the job.
pub async fn fixed(catalog_url: Option<&str>) -> Result<(), CommandError> {
    start(catalog_url, GenerationKind::Fixed).await
}

/// Start a custom-volume job, prompting on stdin for any missing count.
///
/// An empty answer (or end of input) cancels without contacting the server.
///
/// # Errors
///
/// Returns an error if a count is not a positive integer, configuration is
/// invalid, or the server refuses the job.
pub async fn custom(catalog_url: Option<&str>, answers: VolumeAnswers) -> Result<(), CommandError> {
    let mut stdin = BufReader::new(tokio::io::stdin());
    let answers = complete_answers(answers, &mut stdin).await?;

    let Some(volume) = CustomVolume::from_prompts(
        answers.brands.as_deref(),
        answers.categories.as_deref(),
        answers.products.as_deref(),
    )?
    else {
        info!("Custom generation cancelled");
        return Ok(());
    };

    start(catalog_url, GenerationKind::Custom(volume)).await
}

async fn start(catalog_url: Option<&str>, kind: GenerationKind) -> Result<(), CommandError> {
    let config = load_config(catalog_url)?;
    let catalog = CatalogClient::new(&config.catalog)?;

    info!("{}", GenerationStatus::progress(&kind).message);
    let status = generation::trigger(&catalog, &GenerationControls::new(), kind).await;

    match status.tone {
        StatusTone::Error => Err(CommandError::Generation(status.message)),
        StatusTone::Progress | StatusTone::Success => {
            info!("{}", status.message);
            Ok(())
        }
    }
}

/// Fill in missing answers from `input`, stopping at the first cancellation.
async fn complete_answers<R>(
    answers: VolumeAnswers,
    input: &mut R,
) -> Result<VolumeAnswers, CommandError>
where
    R: AsyncBufRead + Unpin,
{
    let brands = match answers.brands {
        Some(value) => Some(value),
        None => prompt(input, "brands", DEFAULT_BRANDS).await?,
    };
    if is_cancelled(brands.as_deref()) {
        return Ok(VolumeAnswers::default());
    }

    let categories = match answers.categories {
        Some(value) => Some(value),
        None => prompt(input, "categories", DEFAULT_CATEGORIES).await?,
    };
    if is_cancelled(categories.as_deref()) {
        return Ok(VolumeAnswers::default());
    }

    let products = match answers.products {
        Some(value) => Some(value),
        None => prompt(input, "products", DEFAULT_PRODUCTS).await?,
    };

    Ok(VolumeAnswers {
        brands,
        categories,
        products,
    })
}

fn is_cancelled(answer: Option<&str>) -> bool {
    answer.is_none_or(|a| a.trim().is_empty())
}

/// Ask for one count. `None` at end of input.
async fn prompt<R>(input: &mut R, what: &str, suggested: u32) -> Result<Option<String>, CommandError>
where
    R: AsyncBufRead + Unpin,
{
    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(
            format!("Number of {what} to generate (suggested {suggested}, empty to cancel): ")
                .as_bytes(),
        )
        .await?;
    stdout.flush().await?;

    let mut line = String::new();
    if input.read_line(&mut line).await? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_prompts_fill_missing_counts() {
        let mut input: &[u8] = b"15\n5000\n";
        let answers = VolumeAnswers {
            brands: Some("20".to_string()),
            ..VolumeAnswers::default()
        };

        let answers = complete_answers(answers, &mut input).await.unwrap();
        assert_eq!(answers.brands.as_deref(), Some("20"));
        assert_eq!(answers.categories.as_deref(), Some("15"));
        assert_eq!(answers.products.as_deref(), Some("5000"));
    }

    #[tokio::test]
    async fn test_empty_answer_cancels_remaining_prompts() {
        let mut input: &[u8] = b"\n5000\n";
        let answers = complete_answers(VolumeAnswers::default(), &mut input)
            .await
            .unwrap();
        assert!(answers.brands.is_none());
        assert!(answers.products.is_none());
        // The second line was never consumed.
        assert_eq!(input, b"5000\n");
    }

    #[tokio::test]
    async fn test_end_of_input_cancels() {
        let mut input: &[u8] = b"";
        let answers = complete_answers(VolumeAnswers::default(), &mut input)
            .await
            .unwrap();
        let volume = CustomVolume::from_prompts(
            answers.brands.as_deref(),
            answers.categories.as_deref(),
            answers.products.as_deref(),
        )
        .unwrap();
        assert!(volume.is_none());
    }
}
