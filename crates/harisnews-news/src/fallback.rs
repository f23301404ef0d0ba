//! 폴백 기사 데이터.
//!
//! 외부 API 호출이 실패하거나 API 키가 없을 때 사용하는 고정 기사 목록.
//! ID는 "1" ~ "6"으로 고정이라 상세 페이지 링크가 재시작 후에도 유효하다.

use chrono::{DateTime, Duration, Utc};
use harisnews_core::models::news::{NewsItem, NewsSource};

/// 폴백 기사 목록 (발행 시각은 `now` 기준 상대값)
pub fn articles(now: DateTime<Utc>) -> Vec<NewsItem> {
    vec![
        article(
            "1",
            "NASA Perseverance Rover Makes New Discovery on Mars",
            "The NASA Perseverance rover has discovered new evidence suggesting ancient microbial life might have existed on the red planet billions of years ago.",
            "NASA scientists announced today that the Perseverance rover, which has been exploring Mars since February 2021, has discovered organic compounds in Jezero Crater that could indicate ancient microbial life once thrived there. The rover's sophisticated instruments detected complex carbon molecules preserved in rock samples that were likely deposited by an ancient river delta billions of years ago.\n\n\"These findings are extremely promising,\" said Dr. Sarah Mitchell, lead scientist on the mission. \"While we can't say definitively that we've found evidence of ancient life, these organic signatures are exactly what we'd expect to see if microbial life once existed on Mars.\"\n\nThe samples will be returned to Earth by a future mission for more detailed analysis.",
            "https://example.com/nasa-mars-discovery",
            "https://picsum.photos/id/1/800/450",
            now - Duration::days(2),
            ("bbc-news", "BBC News"),
        ),
        article(
            "2",
            "Global Renewable Energy Capacity Surpasses Fossil Fuels for First Time",
            "A new report shows that global renewable energy capacity has surpassed fossil fuels for the first time, marking a significant milestone in the fight against climate change.",
            "According to a comprehensive report released by the International Energy Agency (IEA), global renewable energy capacity has exceeded that of fossil fuels for the first time in history. Solar and wind power installations have accelerated dramatically over the past five years, driven by falling costs and supportive government policies.\n\n\"This represents a pivotal moment in the global energy transition,\" said IEA Executive Director Fatih Birol. \"The rapid growth of renewables is reshaping the global energy landscape faster than many anticipated.\"\n\nThe report indicates that renewable energy sources now account for 52% of global electricity generation capacity, with solar power experiencing the most substantial growth. China, the United States, and the European Union lead in renewable energy installations.",
            "https://example.com/renewable-energy-milestone",
            "https://picsum.photos/id/2/800/450",
            now - Duration::days(3),
            ("cnn", "CNN"),
        ),
        article(
            "3",
            "New Breakthrough in Quantum Computing Promises Faster Problem-Solving",
            "Scientists have achieved a quantum computing breakthrough that could dramatically accelerate complex calculations and enable new applications in medicine, materials science, and artificial intelligence.",
            "Researchers at MIT's Quantum Computing Laboratory have demonstrated a new quantum computing architecture that maintains quantum coherence for significantly longer periods than previously possible. This breakthrough, published today in the journal Science, could dramatically accelerate the development of practical quantum computers capable of solving complex problems beyond the reach of classical computers.\n\n\"We've essentially found a way to reduce quantum decoherence by two orders of magnitude,\" explained Dr. Robert Zhang, lead author of the study. \"This means quantum computers based on our architecture could perform thousands more operations before errors accumulate.\"\n\nThe innovation involves a novel approach to error correction and a hybrid superconducting-photonic qubit design that shields quantum states from environmental interference. Industry experts suggest this breakthrough could accelerate quantum applications in drug discovery, materials science, and artificial intelligence.",
            "https://example.com/quantum-computing-breakthrough",
            "https://picsum.photos/id/3/800/450",
            now - Duration::days(1),
            ("the-verge", "The Verge"),
        ),
        article(
            "4",
            "Tech Giants Announce Major Investment in Artificial Intelligence Safety Research",
            "Leading technology companies have committed $1 billion to a new consortium focused on ensuring the safe development of advanced artificial intelligence systems.",
            "A coalition of major technology companies including Google, Microsoft, Amazon, and OpenAI announced today a joint commitment of $1 billion to establish the Global AI Safety Institute, an independent research organization dedicated to addressing potential risks from advanced artificial intelligence systems.\n\nThe institute will focus on technical research to ensure AI systems remain safe, secure, and aligned with human values as they become increasingly powerful. It will also develop standards and benchmarks for evaluating AI safety and publish open research to benefit the broader scientific community.\n\n\"As AI capabilities advance rapidly, we need to ensure these systems are developed responsibly,\" said Jennifer Moore, newly appointed director of the institute. \"This initiative represents an unprecedented collaboration among competitors who recognize that AI safety is a pre-competitive issue that requires collective action.\"\n\nThe consortium plans to collaborate with academic institutions, governments, and civil society organizations to develop governance frameworks for advanced AI systems.",
            "https://example.com/ai-safety-investment",
            "https://picsum.photos/id/4/800/450",
            now - Duration::days(4),
            ("techcrunch", "TechCrunch"),
        ),
        article(
            "5",
            "New Study Reveals Benefits of Four-Day Work Week on Productivity and Well-being",
            "The largest trial of a four-day work week to date shows significant improvements in employee well-being and productivity, with 92% of participating companies planning to continue the practice.",
            "Results from the world's largest four-day work week trial have been published, showing overwhelmingly positive outcomes for both employees and businesses. The six-month study involved 33 companies and over 900 employees across various industries.\n\nResearchers found that employee well-being improved dramatically, with stress levels decreasing by 38% and burnout cases dropping by 71%. Perhaps most surprisingly, business productivity remained stable or improved in 94% of the participating companies despite the reduced working hours.\n\n\"These results challenge the notion that working longer hours necessarily leads to greater productivity,\" said Professor Helen Richardson, who led the research team. \"We found that employees were more focused, more energized, and more creative when given an additional day off each week.\"\n\nOf the companies that participated in the trial, 92% have decided to continue with the four-day work week permanently, with many citing improved talent retention and recruitment advantages.",
            "https://example.com/four-day-work-week-benefits",
            "https://picsum.photos/id/5/800/450",
            now - Duration::days(5),
            ("business-insider", "Business Insider"),
        ),
        article(
            "6",
            "Global Markets Respond to Central Bank Interest Rate Decision",
            "Financial markets worldwide showed mixed reactions as the Federal Reserve announced it would hold interest rates steady while signaling potential cuts later in the year.",
            "Global financial markets responded with cautious optimism today after the Federal Reserve announced it would maintain current interest rates while signaling potential cuts later this year. The decision comes amid growing evidence that inflation is cooling while employment remains robust.\n\n\"We believe the current monetary policy stance is appropriate given the economic data,\" said Federal Reserve Chair in the post-meeting press conference. \"However, we remain data-dependent and are prepared to adjust our approach if economic conditions warrant.\"\n\nStock markets in the United States initially rallied on the news before settling into more modest gains. European and Asian markets showed mixed reactions, with technology stocks generally outperforming other sectors. The dollar weakened slightly against major currencies, while Treasury yields declined.\n\nEconomists suggest that the Fed's more dovish tone indicates growing confidence that inflation is returning to target levels without significant damage to the labor market, potentially setting the stage for a \"soft landing\" scenario that avoids recession.",
            "https://example.com/markets-central-bank-decision",
            "https://picsum.photos/id/6/800/450",
            now - Duration::hours(16),
            ("cnn", "CNN"),
        ),
    ]
}

/// ID로 폴백 기사 조회
pub fn find(id: &str, now: DateTime<Utc>) -> Option<NewsItem> {
    articles(now).into_iter().find(|item| item.id == id)
}

#[allow(clippy::too_many_arguments)]
fn article(
    id: &str,
    title: &str,
    description: &str,
    content: &str,
    url: &str,
    image: &str,
    published_at: DateTime<Utc>,
    (source_id, source_name): (&str, &str),
) -> NewsItem {
    NewsItem {
        id: id.to_string(),
        title: title.to_string(),
        description: Some(description.to_string()),
        content: Some(content.to_string()),
        url: url.to_string(),
        url_to_image: Some(image.to_string()),
        published_at: Some(published_at),
        source: NewsSource {
            id: source_id.to_string(),
            name: source_name.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_articles_with_stable_ids() {
        let now = Utc::now();
        let items = articles(now);
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6"]);
        assert!(items.iter().all(|i| i.published_at.unwrap() < now));
    }

    #[test]
    fn publish_times_are_relative() {
        let now = Utc::now();
        let markets = find("6", now).unwrap();
        assert_eq!(markets.published_at, Some(now - Duration::hours(16)));
        assert_eq!(markets.source.id, "cnn");
    }

    #[test]
    fn find_unknown_id() {
        assert!(find("7", Utc::now()).is_none());
    }
}
